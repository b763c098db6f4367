mod classify;
mod cli;
mod config;
mod error;
mod filter;
mod path;
mod sync;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use sync::output::{MirrorEvent, Reporter};
use sync::{watch::WatchMode, SyncEngine};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str()));

    // stdout carries the diagnostic lines (and NDJSON), logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    // Validate arguments
    cli.validate()?;

    // Canonical root so watcher paths strip cleanly
    let root = std::fs::canonicalize(&cli.root)
        .with_context(|| format!("Failed to resolve workspace root {}", cli.root.display()))?;

    let config = cli.mirror_config(root.clone());
    let engine = SyncEngine::new(&config, cli.dry_run)?;
    let reporter = Reporter::new(cli.quiet, cli.json);

    if cli.json {
        MirrorEvent::Start {
            root: root.clone(),
            destinations: engine.destination_count(),
            dry_run: cli.dry_run,
        }
        .emit();
    } else if !cli.quiet {
        println!("shader-mirror v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Mirroring shaders under {} → {} build directories",
            root.display(),
            engine.destination_count()
        );
        if cli.dry_run {
            println!("Mode: Dry-run (no files will be copied)");
        }
        println!("Press Ctrl-C to stop\n");
    }

    WatchMode::new(engine, root, reporter).watch().await?;

    Ok(())
}
