//! Core value types for the Spine resource model.
//!
//! This crate defines the leaf types every other Spine subsystem builds on:
//! - [`ResourceIdentifier`]: the immutable (type, id) pair naming a server entity
//! - [`RelationshipData`]: an unresolved relationship payload (links and/or identifiers)
//!
//! Both convert to and from flat JSON dictionaries. The key names in [`keys`] are
//! part of the wire contract and must match existing persisted records byte-for-byte.

mod identifier;
pub mod keys;
mod relationship;

pub use identifier::ResourceIdentifier;
pub use relationship::RelationshipData;

/// Flat dictionary form used by every encode/decode entry point.
pub type Dictionary = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding identifiers and relationships.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("malformed relationship: {0}")]
    MalformedRelationship(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
