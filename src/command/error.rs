use thiserror::Error;

use crate::models::ModelError;
use crate::storage::StorageError;

/// Command-level failures. Every variant is recoverable: the console
/// prints the message and keeps reading lines.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    ClassMissing,

    #[error("** class doesn't exist **")]
    ClassUnknown,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    InstanceNotFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    AttributeValueMissing,

    #[error("invalid value for {attr}: {value}")]
    InvalidValue { attr: String, value: String },

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
