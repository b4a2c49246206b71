//! Classify command: score one file against the component heuristics

use std::fs;

use crate::classify::classify;
use crate::cli::{ClassifyArgs, OutputFormat};
use crate::commands::CommandContext;
use crate::error::{PropscanError, Result};
use crate::lang::Lang;

/// Handle the classify command
pub fn run_classify(args: &ClassifyArgs, ctx: &CommandContext) -> Result<String> {
    if !args.file.exists() {
        return Err(PropscanError::FileNotFound {
            path: args.file.display().to_string(),
        });
    }

    // Surface unsupported extensions up front rather than scoring noise
    Lang::from_path(&args.file)?;

    let source = fs::read_to_string(&args.file)?;

    if ctx.verbose {
        eprintln!("Read {} bytes from {}", source.len(), args.file.display());
    }

    let detection = classify(&source, &args.file);

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&detection).map_err(|e| {
                PropscanError::ExtractionFailure {
                    message: format!("JSON serialization failed: {}", e),
                }
            })?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Text => {
            let mut text = String::new();
            text.push_str(&format!("file: {}\n", args.file.display()));
            text.push_str(&format!("is_component: {}\n", detection.is_component));
            text.push_str(&format!("confidence: {}\n", detection.confidence));
            text.push_str(&format!("reason: {}\n", detection.reason));
            if !detection.matched_patterns.is_empty() {
                text.push_str(&format!(
                    "patterns: {}\n",
                    detection.matched_patterns.join(",")
                ));
            }
            Ok(text)
        }
    }
}
