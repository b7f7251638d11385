use std::path::PathBuf;

use thiserror::Error;

use crate::{OffsetTableError, blob::BlobError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file {path:?} is not valid JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error(transparent)]
    Table(#[from] OffsetTableError),
    #[error(transparent)]
    Blob(#[from] BlobError),
}
