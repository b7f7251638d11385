use thiserror::Error;

use crate::TensorNameError;

#[derive(Debug, Error)]
pub enum OffsetTableError {
    #[error("Tensor \"{0}\" not found in offset table.")]
    NotFound(String),
    #[error("Tensor \"{0}\" appears more than once in offset table.")]
    DuplicateKey(String),
    #[error("Malformed tensor name: {0}")]
    MalformedName(#[from] TensorNameError),
    #[error("Failed to parse offset table JSON")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read offset table")]
    Io(#[from] std::io::Error),
}
