//! # Feed Syncer CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Feed loading with per-feed drop-and-continue
//! - Pipeline orchestration (rate, window, per-feed resampling tasks)
//! - Run reporting

mod cli;
mod commands;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::Layer;

use cli::{Cli, Commands};
use commands::{run_info, run_pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli)?;

    let result = match &cli.command {
        Commands::Run(args) => run_pipeline(args).await,
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "command failed");
    }

    result
}

/// Build the subscriber from the verbosity flags and log format.
///
/// `--quiet` wins over everything, including `RUST_LOG`; otherwise the
/// environment filter takes precedence over the `-v` count.
fn init_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else {
        let default_directive = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive))
    };

    let fmt_layer = match cli.log_format {
        cli::LogFormat::Json => fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        cli::LogFormat::Pretty => fmt::layer().pretty().with_target(false).boxed(),
        cli::LogFormat::Compact => fmt::layer().compact().without_time().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
