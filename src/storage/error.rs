use thiserror::Error;

use crate::models::ModelError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("object has no id")]
    MissingId,

    #[error("record {key} is not an object")]
    NotAnObject { key: String },

    #[error("record {key} has no class tag")]
    MissingTag { key: String },

    #[error("unknown class tag: {0}")]
    UnknownClass(String),

    #[error("failed to rebuild {key}: {source}")]
    Reconstruct { key: String, source: ModelError },
}
