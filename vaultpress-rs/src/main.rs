//! Vaultpress CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vaultpress::cli::args::{Cli, Commands};
use vaultpress::cli::output::Output;
use vaultpress::cli::{chapters, convert};
use vaultpress::config::Config;
use vaultpress::error::{ExitCode as PressExitCode, PressError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("vaultpress={level}"))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<PressExitCode, PressError> {
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Convert(args) => convert::run(config, args, &output)?,
        Commands::Chapters(args) => chapters::run(args, &output)?,
    }

    Ok(PressExitCode::Success)
}
