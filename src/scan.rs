//! Directory scan pipeline and document-store aggregation
//!
//! Single-threaded and synchronous: one file at a time, no retries. A
//! failure on one file is recorded and the loop moves on; the only fatal
//! condition is failing to write the final document store.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::error::{PropscanError, Result};
use crate::extract::{extract_file, ComponentParser, ProjectDescriptor};
use crate::schema::{ComponentRecord, DocumentStore, RunSummary, STORE_VERSION};

/// Byte cap for the raw excerpt kept on each record
pub const EXCERPT_CAP: usize = 3000;

/// Default output artifact name
pub const DEFAULT_OUTPUT: &str = "component_docs.json";

/// Directories excluded from traversal (build output, dependencies,
/// test/story trees)
const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    ".next",
    "storybook-static",
    ".storybook",
    "__tests__",
    "__mocks__",
    ".git",
];

/// Options for one scan run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub extensions: Vec<String>,
    /// Remove a pre-existing artifact instead of short-circuiting
    pub force: bool,
    /// Cap on candidate files, for testing against large trees
    pub max_files: Option<usize>,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let output = root.join(DEFAULT_OUTPUT);
        Self {
            root,
            output,
            extensions: crate::lang::Lang::default_extensions()
                .iter()
                .map(|e| e.to_string())
                .collect(),
            force: false,
            max_files: None,
        }
    }
}

/// Outcome of a scan run
#[derive(Debug)]
pub struct ScanOutcome {
    /// True when a pre-existing artifact short-circuited the run
    pub skipped_existing: bool,
    pub output: PathBuf,
    pub store: Option<DocumentStore>,
}

/// Run the full pipeline: gate, walk, classify, extract, aggregate, write
pub fn run(options: &ScanOptions, parser: &dyn ComponentParser) -> Result<ScanOutcome> {
    if !options.root.exists() {
        return Err(PropscanError::FileNotFound {
            path: options.root.display().to_string(),
        });
    }
    if !options.root.is_dir() {
        return Err(PropscanError::NotADirectory {
            path: options.root.display().to_string(),
        });
    }

    // Write-once gate, checked exactly once before any file is touched
    if options.output.exists() {
        if options.force {
            fs::remove_file(&options.output)?;
            info!(output = %options.output.display(), "removed existing document store");
        } else {
            info!(output = %options.output.display(), "document store exists, skipping run");
            return Ok(ScanOutcome {
                skipped_existing: true,
                output: options.output.clone(),
                store: None,
            });
        }
    }

    let mut files = collect_candidate_files(&options.root, &options.extensions);
    // Walk order is platform-dependent; sort for a reproducible pass
    files.sort();
    if let Some(cap) = options.max_files {
        files.truncate(cap);
    }

    let descriptor = ProjectDescriptor::new(&options.root);
    let mut summary = RunSummary::default();
    let mut records: Vec<ComponentRecord> = Vec::new();
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

    for path in &files {
        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to read file");
                summary.files_failed += 1;
                continue;
            }
        };

        summary.files_scanned += 1;

        let relative = relative_path(&options.root, path);
        let detection = classify(&source, path);
        if !detection.is_component {
            debug!(file = %relative, reason = %detection.reason, "rejected");
            summary.files_skipped += 1;
            continue;
        }

        for component in extract_file(path, &source, parser, &descriptor) {
            let key = (relative.clone(), component.name.clone());
            if !seen.insert(key) {
                continue;
            }
            records.push(ComponentRecord {
                name: component.name,
                file: relative.clone(),
                directory: parent_of(&relative),
                props: component.props,
                description: component.description,
                raw_excerpt: excerpt(&source),
                extraction_method: component.extraction_method,
                component_type: component.component_type,
                features: component.features,
                tags: component.tags,
            });
        }
    }

    sort_records(&mut records);
    for record in &records {
        summary.record(record);
    }

    let store = DocumentStore {
        generated_at: chrono::Utc::now().to_rfc3339(),
        version: format!("{}+schema.{}", env!("CARGO_PKG_VERSION"), STORE_VERSION),
        summary,
        components: records,
    };

    write_store(&options.output, &store)?;
    info!(
        output = %options.output.display(),
        components = store.components.len(),
        "document store written"
    );

    Ok(ScanOutcome {
        skipped_existing: false,
        output: options.output.clone(),
        store: Some(store),
    })
}

/// Collect candidate files under the root, honoring the ignore set and the
/// extension allow-list
fn collect_candidate_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .follow_links(false)
        .filter_entry(|entry| {
            let name = entry.file_name().to_str().unwrap_or("");
            !(entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                && IGNORED_DIRS.contains(&name))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if is_test_or_story_file(name) {
                continue;
            }
        }
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                files.push(path.to_path_buf());
            }
        }
    }
    files
}

/// Test/story filename filtering applied during traversal
/// (`Button.test.tsx`, `Button.spec.ts`, `Button.stories.tsx`)
fn is_test_or_story_file(name: &str) -> bool {
    name.split('.')
        .any(|seg| matches!(seg, "test" | "spec" | "stories"))
}

/// Sort records by display name: case-insensitive, tie-broken by raw name
/// so the ordering is total and deterministic
pub fn sort_records(records: &mut [ComponentRecord]) {
    records.sort_by(|a, b| {
        (a.name.to_lowercase(), &a.name, &a.file).cmp(&(b.name.to_lowercase(), &b.name, &b.file))
    });
}

/// Path relative to the scan root, with forward slashes
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn parent_of(relative: &str) -> String {
    match relative.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

/// Bounded prefix of the file text, truncated on a char boundary
fn excerpt(source: &str) -> String {
    if source.len() <= EXCERPT_CAP {
        return source.to_string();
    }
    let mut end = EXCERPT_CAP;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    source[..end].to_string()
}

/// Serialize and write the document store; the only fatal failure mode
fn write_store(output: &Path, store: &DocumentStore) -> Result<()> {
    let json =
        serde_json::to_string_pretty(store).map_err(|e| PropscanError::WriteFailure {
            path: output.display().to_string(),
            message: format!("serialization failed: {}", e),
        })?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PropscanError::WriteFailure {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;
        }
    }

    fs::write(output, json).map_err(|e| PropscanError::WriteFailure {
        path: output.display().to_string(),
        message: e.to_string(),
    })
}
