use color_eyre::eyre::{eyre, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `log_file`; stdout belongs to the terminal UI and
/// the headless report. `RUST_LOG` overrides the level picked by `debug`.
pub fn init(log_file: &Path, debug: bool) -> Result<()> {
    let default_level = if debug {
        "debug,sqlx=info"
    } else {
        "info,sqlx=warn"
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(debug)
        .try_init()
        .map_err(|e| eyre!("Failed to install the log subscriber: {e}"))
}
