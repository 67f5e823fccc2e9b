//! FOLIO_OS headless entry point.
//!
//! Reads commands from stdin one per line and prints the resulting desktop
//! scene after each. Type `help` for the command list.
//!
//! Configuration comes from the TOML file named by the first argument or
//! the `FOLIO_CONFIG` environment variable; defaults apply otherwise.

mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use folio_core::config::FolioConfig;
use folio_core::platform::WallClock;
use folio_core::storage::{FileStore, KeyValueStore, MemoryStore};
use folio_core::{Desktop, render};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Starting {} ({}x{})",
        config.window_title,
        config.screen_width,
        config.screen_height,
    );

    let store: Box<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => Box::new(
            FileStore::open(path).with_context(|| format!("opening store {}", path.display()))?,
        ),
        None => Box::new(MemoryStore::new()),
    };

    let mut desktop = Desktop::new(config, store, Box::new(WallClock));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render(&desktop))?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match commands::parse(&line) {
            Ok(Some(cmd)) => {
                for msg in commands::execute(&mut desktop, cmd) {
                    writeln!(out, "{msg}")?;
                }
            },
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            },
        }
        write!(out, "{}", render(&desktop))?;
        out.flush()?;
        if !desktop.is_running() {
            break;
        }
    }

    desktop.shutdown();
    Ok(())
}

/// Config from the first CLI argument or `FOLIO_CONFIG`, else defaults.
fn load_config() -> Result<FolioConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOLIO_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => FolioConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(FolioConfig::default()),
    }
}
