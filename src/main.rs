mod app;
mod error;
mod form_core;
mod model;
mod services;
mod theme;
mod ui;
mod widgets;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

fn main() -> Result<()> {
    let (cfg, base_dir) = ui::load_config()?;
    init_tracing(log_path(cfg.log_file.as_deref(), base_dir.as_ref()))?;
    tracing::info!(title = %cfg.title, "starting");
    ui::run(cfg, base_dir)
}

// DYNFORM_LOG wins over the config; relative config paths follow the config dir
fn log_path(configured: Option<&str>, base_dir: Option<&PathBuf>) -> Option<PathBuf> {
    if let Ok(p) = std::env::var("DYNFORM_LOG") {
        return Some(PathBuf::from(p));
    }
    let p = PathBuf::from(configured?);
    match base_dir {
        Some(dir) if p.is_relative() => Some(dir.join(p)),
        _ => Some(p),
    }
}

/// The terminal belongs to the UI, so logs go to a file or nowhere.
fn init_tracing(path: Option<PathBuf>) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {path:?}"))?;
            install(filter, Mutex::new(file));
        }
        None => install(filter, std::io::sink),
    }
    Ok(())
}

fn install<W>(filter: String, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
}
