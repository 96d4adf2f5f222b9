use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DEFAULT_LOG_FILE: &str = "array-section.log";

/// Send tracing output to a file; the terminal belongs to the UI. `RUST_LOG`
/// applies when no level is given.
pub fn init(path: Option<PathBuf>, level: Option<Level>) -> Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter = match level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(level.into())
            .parse_lossy(""),
        None => EnvFilter::builder()
            .with_default_directive(Level::WARN.into())
            .from_env_lossy(),
    };

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;
    Ok(())
}
