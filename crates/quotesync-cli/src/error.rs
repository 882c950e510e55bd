use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quotesync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Settings file already exists at {}; pass --force to overwrite", .0.display())]
    ConfigExists(PathBuf),
    #[error(
        "Remote sync is not configured. Set remote_url via `quotesync config init --remote-url <URL>` or QUOTESYNC_REMOTE_URL."
    )]
    SyncNotConfigured,
}
