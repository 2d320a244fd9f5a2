//! capsift CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use capsift::cli::Args;
use capsift::scan::TokenScanner;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging goes to stderr; stdout carries only the token.
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let capture = std::fs::read(&args.file)
        .with_context(|| format!("failed to read capture file: {}", args.file.display()))?;

    let scanner = TokenScanner::new(&args.prefix, args.stride);
    let token = capsift::recover_token(&capture, &scanner)
        .await
        .with_context(|| format!("no token recovered from {}", args.file.display()))?;

    println!("{token}");
    Ok(())
}
