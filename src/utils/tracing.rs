use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt::Subscriber;

pub fn log_level_from_env(default: Level) -> Level {
    std::env::var("LOG_LEVEL")
        .map_err(|e| anyhow!("LOG_LEVEL environment variable is not set: {}", e))
        .and_then(|l| Level::from_str(&l).map_err(|e| anyhow!("Invalid log level: {}", e)))
        .unwrap_or(default)
}

/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_tracing() -> Result<()> {
    let subscriber = Subscriber::builder()
        .with_max_level(log_level_from_env(Level::WARN))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")
}
