//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// React/TypeScript component metadata extractor
#[derive(Parser, Debug)]
#[command(name = "propscan")]
#[command(about = "Scan a UI source tree and extract component prop documentation")]
#[command(version)]
#[command(author)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for propscan
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory tree and write the component document store
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Classify a single file without extracting
    #[command(visible_alias = "c")]
    Classify(ClassifyArgs),
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory to scan (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output artifact path (defaults to component_docs.json under the root)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// File extensions to consider
    #[arg(long, value_name = "EXT", value_delimiter = ',', default_values_t = default_extensions())]
    pub ext: Vec<String>,

    /// Overwrite an existing document store instead of skipping the run
    #[arg(long)]
    pub force: bool,

    /// Stop after this many candidate files
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,
}

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// File to classify
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

fn default_extensions() -> Vec<String> {
    crate::lang::Lang::default_extensions()
        .iter()
        .map(|e| e.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_scan_with_defaults() {
        let cli = Cli::try_parse_from(["propscan", "scan"]).unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.path.is_none());
                assert!(!args.force);
                assert_eq!(args.ext, vec!["ts", "tsx", "js", "jsx"]);
            }
            _ => panic!("expected scan subcommand"),
        }
    }

    #[test]
    fn cli_parses_classify_with_json_format() {
        let cli =
            Cli::try_parse_from(["propscan", "--format", "json", "classify", "Button.tsx"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.file, PathBuf::from("Button.tsx"));
            }
            _ => panic!("expected classify subcommand"),
        }
    }

    #[test]
    fn cli_parses_custom_extensions() {
        let cli = Cli::try_parse_from(["propscan", "scan", "--ext", "tsx,jsx"]).unwrap();
        match cli.command {
            Commands::Scan(args) => assert_eq!(args.ext, vec!["tsx", "jsx"]),
            _ => panic!("expected scan subcommand"),
        }
    }
}
