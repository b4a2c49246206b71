//! Scan command: walk a source tree and write the document store

use std::env;
use std::path::PathBuf;

use crate::cli::{OutputFormat, ScanArgs};
use crate::commands::CommandContext;
use crate::error::{PropscanError, Result};
use crate::extract::TreeSitterParser;
use crate::scan::{self, ScanOptions};

/// Handle the scan command
pub fn run_scan(args: &ScanArgs, ctx: &CommandContext) -> Result<String> {
    let root = match &args.path {
        Some(p) => p.clone(),
        None => env::current_dir()?,
    };

    let mut options = ScanOptions::new(root);
    if let Some(out) = &args.out {
        options.output = out.clone();
    }
    if !args.ext.is_empty() {
        options.extensions = args.ext.clone();
    }
    options.force = args.force;
    options.max_files = args.max_files;

    if ctx.verbose {
        eprintln!("Scanning {}", options.root.display());
    }

    let parser = TreeSitterParser;
    let outcome = scan::run(&options, &parser)?;

    if outcome.skipped_existing {
        return Ok(format!(
            "Document store already exists at {} (use --force to regenerate)\n",
            outcome.output.display()
        ));
    }

    let store = outcome
        .store
        .ok_or_else(|| PropscanError::ExtractionFailure {
            message: "scan completed without producing a store".to_string(),
        })?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&store.summary).map_err(|e| {
                PropscanError::ExtractionFailure {
                    message: format!("JSON serialization failed: {}", e),
                }
            })?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Text => Ok(format_summary(&outcome.output, &store)),
    }
}

fn format_summary(output: &PathBuf, store: &crate::schema::DocumentStore) -> String {
    let s = &store.summary;
    let mut text = String::new();
    text.push_str(&format!("Wrote {}\n", output.display()));
    text.push_str(&format!("files_scanned: {}\n", s.files_scanned));
    text.push_str(&format!("files_skipped: {}\n", s.files_skipped));
    if s.files_failed > 0 {
        text.push_str(&format!("files_failed: {}\n", s.files_failed));
    }
    text.push_str(&format!("components: {}\n", s.components_found));

    if !s.by_method.is_empty() {
        let methods: Vec<String> = s.by_method.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        text.push_str(&format!("by_method: {}\n", methods.join(",")));
    }
    if !s.by_type.is_empty() {
        let types: Vec<String> = s.by_type.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        text.push_str(&format!("by_type: {}\n", types.join(",")));
    }
    text
}
