//! propscan CLI entry point

use std::process::ExitCode;

use clap::Parser;

use propscan::commands::{run_classify, run_scan, CommandContext};
use propscan::{Cli, Commands};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> propscan::Result<String> {
    let cli = Cli::parse();
    let ctx = CommandContext::from_cli(cli.format, cli.verbose);

    match &cli.command {
        Commands::Scan(args) => run_scan(args, &ctx),
        Commands::Classify(args) => run_classify(args, &ctx),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
