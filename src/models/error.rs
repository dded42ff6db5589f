use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("attribute {0} is read-only")]
    ReadOnlyAttribute(String),

    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("bad field data: {0}")]
    Fields(String),
}
