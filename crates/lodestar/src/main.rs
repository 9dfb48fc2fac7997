//! Lodestar CLI - extension recommendations for cloud IDE workspaces
//!
//! This is the main entry point for the Lodestar command-line interface.

mod cli;
mod commands;
mod host;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must happen before the catalog client opens any TLS connection
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, config_dir).await,
        Commands::Recommend(args) => commands::recommend::run(args, config_dir).await,
        Commands::Advise(args) => commands::advise::run(args, config_dir).await,
        Commands::Watch(args) => commands::watch::run(args, config_dir).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn,lodestar=info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
