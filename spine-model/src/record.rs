//! Persisted representation of a resource.
//!
//! A record carries identity, location, load state, metadata and the raw
//! relationship table. Field values are not persisted; they are re-fetched.
//! Every key is optional on decode so records written by older versions
//! still restore.

use crate::{ModelError, ModelResult, Resource, ResourceSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spine_types::{Dictionary, RelationshipData};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Flat, serializable snapshot of a [`Resource`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Url>,
    #[serde(rename = "isLoaded", default)]
    pub is_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Dictionary>,
    /// Kept as raw JSON so one bad entry cannot fail the whole record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
}

impl ResourceRecord {
    /// Encodes the record as JSON bytes.
    pub fn to_bytes(&self) -> ModelResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a record from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> ModelResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decodes the relationship block, dropping anything malformed.
    #[must_use]
    pub fn decode_relationships(&self) -> BTreeMap<String, RelationshipData> {
        let entries = match &self.relationships {
            None => return BTreeMap::new(),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                warn!("Ignoring malformed relationship block: {}", other);
                return BTreeMap::new();
            }
        };

        entries
            .iter()
            .filter_map(|(name, entry)| match RelationshipData::from_value(entry) {
                Ok(data) => Some((name.clone(), data)),
                Err(e) => {
                    warn!("Dropping relationship `{}`: {}", name, e);
                    None
                }
            })
            .collect()
    }
}

impl Resource {
    /// Builds the persisted record for this resource.
    #[must_use]
    pub fn to_record(&self) -> ResourceRecord {
        let relationships: Dictionary = self
            .relationships()
            .iter()
            .map(|(name, data)| (name.clone(), Value::Object(data.to_dictionary())))
            .collect();

        ResourceRecord {
            resource_type: Some(self.resource_type().to_owned()),
            id: self.id().map(str::to_owned),
            location: self.location().cloned(),
            is_loaded: self.is_loaded(),
            meta: self.meta().cloned(),
            relationships: Some(Value::Object(relationships)),
        }
    }

    /// Restores a resource of `schema`'s type from a persisted record.
    ///
    /// The restored resource has no field values and no snapshots.
    pub fn from_record(schema: Arc<ResourceSchema>, record: ResourceRecord) -> ModelResult<Self> {
        if let Some(found) = &record.resource_type {
            if *found != schema.resource_type {
                return Err(ModelError::TypeMismatch {
                    expected: schema.resource_type.clone(),
                    found: found.clone(),
                });
            }
        }

        let relationships = record.decode_relationships();
        let mut resource = Resource::new(schema);
        resource.set_id(record.id);
        resource.set_location(record.location);
        resource.set_loaded(record.is_loaded);
        resource.set_meta(record.meta);
        resource.replace_relationships(relationships);
        debug!("Restored {} from record", resource);
        Ok(resource)
    }

    /// Encodes this resource's persisted record as JSON bytes.
    pub fn to_bytes(&self) -> ModelResult<Vec<u8>> {
        self.to_record().to_bytes()
    }

    /// Restores a resource of `schema`'s type from JSON bytes.
    pub fn from_bytes(schema: Arc<ResourceSchema>, bytes: &[u8]) -> ModelResult<Self> {
        Self::from_record(schema, ResourceRecord::from_bytes(bytes)?)
    }
}
