use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use cstrack_core::LogSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: stderr plus the append-only log file.
///
/// `RUST_LOG` wins over the configured level when set. If the log file
/// cannot be opened the run continues with stderr only.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .with_context(|| format!("invalid log level \"{}\"", settings.log_level))?;

    let (file, open_error) = match open_log_file(&settings.log_file) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Arc::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(e) = open_error {
        tracing::warn!(
            path = %settings.log_file.display(),
            error = %e,
            "log file unavailable; logging to stderr only"
        );
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
