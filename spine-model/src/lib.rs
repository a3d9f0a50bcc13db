//! Client-side resource model for Spine.
//!
//! Defines the entity layer that sits between a JSON:API deserializer and the
//! application:
//! - [`ResourceSchema`]: a resource type's name and ordered [`FieldDescriptor`] list
//! - [`SchemaRegistry`]: the set of known resource types, built once at startup
//! - [`Resource`]: identity, load state, metadata, relationships, and per-field
//!   dirty tracking against the last accepted server baseline
//! - [`FieldValue`] / [`ResolvedCollection`]: live field storage, including
//!   lazily-resolved relationship collections that track their own dirtiness
//! - [`ResourceRecord`]: the flat persisted form of a resource
//!
//! Nothing here performs I/O. A `Resource` is plain owned data; callers that
//! share one across threads must serialize their own writes.

mod collection;
mod error;
mod record;
mod registry;
mod resource;
mod schema;
mod value;

pub use collection::LinkedResourceCollection;
pub use error::{ModelError, ModelResult};
pub use record::ResourceRecord;
pub use registry::SchemaRegistry;
pub use resource::Resource;
pub use schema::{FieldDescriptor, FieldKind, ResourceSchema};
pub use value::{FieldValue, ResolvedCollection};

pub use spine_types::{Dictionary, RelationshipData, ResourceIdentifier};
