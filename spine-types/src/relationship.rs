//! Unresolved relationship payloads.
//!
//! A relationship may be known only by its links, only by its linkage
//! (identifier list), or by both. The dictionary form is sparse: a member that
//! is `None` has no key at all, so decoding can tell "not sent" apart from
//! "sent and empty".

use crate::{Dictionary, Error, ResourceIdentifier, Result, keys};
use serde_json::Value;
use tracing::warn;

/// Raw relationship payload as received from the server, before any related
/// resources are fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipData {
    /// Link to the relationship object itself, exactly as received.
    pub self_link: Option<String>,
    /// Link to the related resource(s), exactly as received.
    pub related_link: Option<String>,
    /// Linkage. `Some(vec![])` is an explicitly empty relationship.
    pub identifiers: Option<Vec<ResourceIdentifier>>,
}

impl RelationshipData {
    #[must_use]
    pub fn new(
        self_link: Option<String>,
        related_link: Option<String>,
        identifiers: Option<Vec<ResourceIdentifier>>,
    ) -> Self {
        Self {
            self_link,
            related_link,
            identifiers,
        }
    }

    /// Decodes a relationship from a dictionary with optional `selfURL`,
    /// `relatedURL` and `data` keys.
    ///
    /// Links may be absolute or relative and are kept verbatim; only a
    /// non-string link is malformed. Identifier entries in `data` that fail to
    /// decode are dropped. A `null` link is treated as absent; a `null` `data`
    /// is an empty linkage. A single identifier object under `data` (to-one
    /// linkage) becomes a one-element list.
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self> {
        let self_link = link_member(dict, keys::SELF_URL)?;
        let related_link = link_member(dict, keys::RELATED_URL)?;

        let identifiers = match dict.get(keys::DATA) {
            None => None,
            Some(Value::Null) => Some(Vec::new()),
            Some(Value::Array(entries)) => Some(
                entries
                    .iter()
                    .filter_map(|entry| match ResourceIdentifier::from_value(entry) {
                        Ok(identifier) => Some(identifier),
                        Err(e) => {
                            warn!("Dropping relationship linkage entry: {}", e);
                            None
                        }
                    })
                    .collect(),
            ),
            Some(single @ Value::Object(_)) => Some(
                ResourceIdentifier::from_value(single)
                    .map_err(|e| warn!("Dropping relationship linkage entry: {}", e))
                    .into_iter()
                    .collect(),
            ),
            Some(other) => {
                return Err(Error::MalformedRelationship(format!(
                    "`{}` must be a list, got {other}",
                    keys::DATA
                )));
            }
        };

        Ok(Self {
            self_link,
            related_link,
            identifiers,
        })
    }

    /// Decodes a relationship from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(dict) => Self::from_dictionary(dict),
            other => Err(Error::MalformedRelationship(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// Encodes the relationship, omitting every key whose member is `None`.
    #[must_use]
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        if let Some(link) = &self.self_link {
            dict.insert(keys::SELF_URL.into(), Value::String(link.clone()));
        }
        if let Some(link) = &self.related_link {
            dict.insert(keys::RELATED_URL.into(), Value::String(link.clone()));
        }
        if let Some(identifiers) = &self.identifiers {
            let data = identifiers
                .iter()
                .map(|identifier| Value::Object(identifier.to_dictionary()))
                .collect();
            dict.insert(keys::DATA.into(), Value::Array(data));
        }
        dict
    }

    /// True when neither links nor linkage are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.self_link.is_none() && self.related_link.is_none() && self.identifiers.is_none()
    }
}

fn link_member(dict: &Dictionary, key: &str) -> Result<Option<String>> {
    match dict.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => Ok(Some(raw.clone())),
        Some(other) => Err(Error::MalformedRelationship(format!(
            "`{key}` must be a string, got {other}"
        ))),
    }
}
