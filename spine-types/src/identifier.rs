//! Identity of a server-side resource.

use crate::{Dictionary, Error, Result, keys};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Uniquely names a server-side entity by its resource type and id.
///
/// Equality and hashing are structural over both members. The derived `Hash`
/// feeds `resource_type` and `id` to the hasher separately, so no separator
/// inside either string can make two distinct identifiers collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    resource_type: String,
    id: String,
}

impl ResourceIdentifier {
    /// Creates an identifier from a resource type and id.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Decodes an identifier from a dictionary with string `type` and `id` keys.
    ///
    /// Extra keys are ignored.
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self> {
        let resource_type = string_member(dict, keys::TYPE)?;
        let id = string_member(dict, keys::ID)?;
        Ok(Self { resource_type, id })
    }

    /// Decodes an identifier from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(dict) => Self::from_dictionary(dict),
            other => Err(Error::MalformedIdentifier(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// Encodes the identifier as a `{"type", "id"}` dictionary.
    #[must_use]
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert(keys::TYPE.into(), Value::String(self.resource_type.clone()));
        dict.insert(keys::ID.into(), Value::String(self.id.clone()));
        dict
    }

    /// Returns the resource type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the resource id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.resource_type, self.id)
    }
}

fn string_member(dict: &Dictionary, key: &str) -> Result<String> {
    match dict.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::MalformedIdentifier(format!(
            "`{key}` must be a string, got {other}"
        ))),
        None => Err(Error::MalformedIdentifier(format!("missing `{key}`"))),
    }
}
