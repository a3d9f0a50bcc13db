use crate::{ModelError, ModelResult, Resource, ResourceRecord, ResourceSchema};
use spine_types::ResourceIdentifier;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The set of resource types known to the client.
///
/// Built once at startup; every resource of a type shares the registered
/// schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<ResourceSchema>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema. Each resource type may be registered once.
    pub fn register(&mut self, schema: ResourceSchema) -> ModelResult<Arc<ResourceSchema>> {
        if self.schemas.contains_key(&schema.resource_type) {
            return Err(ModelError::DuplicateResourceType(schema.resource_type));
        }
        let schema = Arc::new(schema);
        debug!(
            "Registered resource type {} ({} fields)",
            schema.resource_type,
            schema.fields.len()
        );
        self.schemas
            .insert(schema.resource_type.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    pub fn schema(&self, resource_type: &str) -> ModelResult<Arc<ResourceSchema>> {
        self.schemas
            .get(resource_type)
            .cloned()
            .ok_or_else(|| ModelError::UnknownResourceType(resource_type.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, resource_type: &str) -> bool {
        self.schemas.contains_key(resource_type)
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Creates an unloaded placeholder for `identifier`.
    pub fn placeholder(&self, identifier: &ResourceIdentifier) -> ModelResult<Resource> {
        let schema = self.schema(identifier.resource_type())?;
        Ok(Resource::with_id(schema, identifier.id()))
    }

    /// Restores a record, dispatching on its resource type.
    pub fn restore_record(&self, record: ResourceRecord) -> ModelResult<Resource> {
        let resource_type = record
            .resource_type
            .as_deref()
            .ok_or(ModelError::MissingResourceType)?;
        let schema = self.schema(resource_type)?;
        Resource::from_record(schema, record)
    }

    /// Restores a resource from persisted bytes, dispatching on its resource type.
    pub fn restore(&self, bytes: &[u8]) -> ModelResult<Resource> {
        self.restore_record(ResourceRecord::from_bytes(bytes)?)
    }
}
