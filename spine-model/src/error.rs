//! Error types for the resource model.

use thiserror::Error;

/// Result type for resource model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in resource model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field name that the resource type does not declare.
    #[error("unknown field `{field}` for resource type `{resource_type}`")]
    UnknownField {
        resource_type: String,
        field: String,
    },

    /// No schema is registered under this resource type.
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// A schema is already registered under this resource type.
    #[error("resource type already registered: {0}")]
    DuplicateResourceType(String),

    /// A persisted record names a different resource type than the schema.
    #[error("record has resource type `{found}`, expected `{expected}`")]
    TypeMismatch { expected: String, found: String },

    /// A persisted record carries no resource type to dispatch on.
    #[error("record has no resource type")]
    MissingResourceType,

    /// Identifier or relationship decode error.
    #[error(transparent)]
    Types(#[from] spine_types::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
