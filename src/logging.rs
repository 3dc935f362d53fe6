//! Log setup.
//!
//! The terminal belongs to the UI, so logs go to a file.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log location: `cby-helper.log` in the system temp dir.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("cby-helper.log")
}

/// Build a subscriber writing plain-text lines to `log_path`.
///
/// `RUST_LOG` overrides the default `cby_helper=info` filter.
pub fn file_subscriber(log_path: &Path) -> std::io::Result<impl Subscriber + Send + Sync> {
    let file = File::create(log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cby_helper=info"));

    let fmt_layer = fmt::layer()
        .with_writer(file)
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false);

    Ok(tracing_subscriber::registry().with(env_filter).with(fmt_layer))
}

/// Install the file subscriber globally.
pub fn init_logging(log_path: &Path) -> std::io::Result<()> {
    file_subscriber(log_path)?
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}
