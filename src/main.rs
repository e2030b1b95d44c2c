//! CLI entry point for the tdocfetch tool.

use std::io::{self, IsTerminal, Read};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tdocfetch_core::config::{self, FileConfig};
use tdocfetch_core::{
    FtpTransport, LocalStore, RetrievalEngine, ZipArchiver, build_catalog, select_meetings,
};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    let started = Instant::now();

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::load_default()?,
    };

    let targets = resolve_targets(&args, &file_config)?;
    if targets.is_empty() {
        info!("No document numbers provided. Pass them as arguments, via --targets-file,");
        info!("a config file, or piped stdin. Example: tdocfetch --from TSGR1_107 --to TSGR1_123 R1-2301111");
        return Ok(());
    }

    let config = args.into_config(&file_config, targets);
    config.validate()?;

    info!(
        host = %config.host,
        base_path = %config.base_path,
        targets = config.targets.len(),
        "tdocfetch starting"
    );

    let store = LocalStore::open(&config.download_dir).with_context(|| {
        format!(
            "cannot create download directory {}",
            config.download_dir.display()
        )
    })?;

    let mut transport = FtpTransport::connect(&config.host, config.port, config.timeout)?;

    let layout = config.layout();
    let catalog = build_catalog(&mut transport, &layout, config.include_adhoc)?;
    for meeting in &catalog {
        debug!(entry = %meeting, "catalog");
    }

    let parser = layout.parser();
    let selection = select_meetings(
        &catalog,
        &parser,
        &config.range_start,
        &config.range_end,
        config.include_adhoc,
        &config.adhoc_filter,
    )?;
    info!(selected = selection.len(), "meetings to scan");
    for meeting in &selection {
        info!(meeting = %meeting.display_name, path = %meeting.remote_path, "scheduled");
    }

    let archiver = ZipArchiver::new(store.root());
    let mut engine = RetrievalEngine::new(layout.base_path.as_str(), config.docs_subdir.as_str());
    if config.archive {
        engine = engine.with_archiver(&archiver);
    }

    let outcome = engine.run(&mut transport, &selection, &config.targets, &store);
    transport.close();

    info!(
        located = outcome.located.len(),
        meetings_with_files = outcome.records.len(),
        "retrieval complete"
    );
    if !outcome.all_located() {
        warn!(
            missing = outcome.missing.len(),
            "some documents were not located within the scanned scope"
        );
    }
    info!(elapsed = ?started.elapsed(), "run finished");

    Ok(())
}

/// Collects document numbers from positional args, a targets file, the
/// settings file, or piped stdin, in that order of preference.
fn resolve_targets(args: &Args, file_config: &FileConfig) -> Result<Vec<String>> {
    if !args.documents.is_empty() {
        return Ok(args.documents.clone());
    }
    if let Some(path) = &args.targets_file {
        return Ok(config::load_targets_file(path)?);
    }
    if let Some(list) = &file_config.targets {
        if !list.is_empty() {
            return Ok(list.clone());
        }
    }
    if let Some(path) = &file_config.targets_file {
        return Ok(config::load_targets_file(path)?);
    }
    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("cannot read document numbers from stdin")?;
        return Ok(config::parse_target_lines(&buffer));
    }
    Ok(Vec::new())
}
