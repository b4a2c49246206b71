//! Layered component extraction
//!
//! Extraction runs as a cascade: the structured parser first, the regex
//! fallback for anything it misses, and synthesized defaults as the floor.

pub mod fallback;
pub mod merge;
pub mod primary;

pub use fallback::FallbackResult;
pub use merge::{merge, ExtractionResult, MergedComponent};
pub use primary::{ComponentParser, ProjectDescriptor, RawComponentDoc, TreeSitterParser};

use std::path::Path;

use tracing::debug;

/// Extract all components from one classified file
///
/// Parser failures are caught here and degrade to the fallback cascade;
/// they never propagate to the scan loop.
pub fn extract_file(
    path: &Path,
    source: &str,
    parser: &dyn ComponentParser,
    descriptor: &ProjectDescriptor,
) -> Vec<MergedComponent> {
    let docs = match parser.parse(path, source, descriptor) {
        Ok(docs) => docs,
        Err(e) => {
            debug!(file = %path.display(), error = %e, "structured parse failed, using fallback");
            Vec::new()
        }
    };

    if docs.is_empty() {
        let name = resolve_display_name(path);
        let result = fallback::extract(source, &name);
        return vec![merge(&name, source, ExtractionResult::Manual(result))];
    }

    docs.into_iter()
        .map(|doc| {
            let name = if doc.name.is_empty() {
                resolve_display_name(path)
            } else {
                doc.name.clone()
            };
            merge(&name, source, ExtractionResult::Automatic(doc))
        })
        .collect()
}

/// Resolve a display name from the file path
///
/// `index.*` files take their parent directory's name, capitalized; other
/// files use the file stem as-is.
pub fn resolve_display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Component");

    if stem != "index" {
        return stem.to_string();
    }

    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("Index");

    capitalize(parent)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
