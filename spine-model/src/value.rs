//! Live field storage.
//!
//! Field values are compared by identity, not by structure: two `FieldValue`s
//! holding equal JSON in different allocations are different values. A field
//! reassigned with an equal copy therefore counts as a write.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A lazily-resolved relationship collection that tracks its own dirtiness.
///
/// When a field's live value is a collection, [`crate::Resource`] asks the
/// collection whether it is dirty instead of comparing it against the
/// snapshot.
pub trait ResolvedCollection: Any + fmt::Debug + Send + Sync {
    fn is_dirty(&self) -> bool;
}

/// The live value of one declared field.
#[derive(Debug)]
pub enum FieldValue {
    /// An attribute or to-one value, shared by handle.
    Value(Arc<Value>),
    /// A resolved relationship collection.
    Collection(Box<dyn ResolvedCollection>),
}

impl FieldValue {
    /// Wraps a JSON value in a fresh handle.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self::Value(Arc::new(value))
    }

    /// Reuses an existing handle, so identity is preserved.
    #[must_use]
    pub fn shared(value: Arc<Value>) -> Self {
        Self::Value(value)
    }

    #[must_use]
    pub fn collection<C: ResolvedCollection>(collection: C) -> Self {
        Self::Collection(Box::new(collection))
    }

    /// True for an explicit JSON `null`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Value(v) if v.is_null())
    }

    /// Returns the JSON value, if this is not a collection.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Collection(_) => None,
        }
    }

    /// Returns the shared handle, if this is not a collection.
    #[must_use]
    pub fn handle(&self) -> Option<&Arc<Value>> {
        match self {
            Self::Value(v) => Some(v),
            Self::Collection(_) => None,
        }
    }

    /// Downcasts a collection value to its concrete type.
    #[must_use]
    pub fn as_collection<C: ResolvedCollection>(&self) -> Option<&C> {
        match self {
            Self::Collection(c) => {
                let any: &dyn Any = &**c;
                any.downcast_ref()
            }
            Self::Value(_) => None,
        }
    }

    /// Mutable counterpart of [`FieldValue::as_collection`].
    pub fn as_collection_mut<C: ResolvedCollection>(&mut self) -> Option<&mut C> {
        match self {
            Self::Collection(c) => {
                let any: &mut dyn Any = &mut **c;
                any.downcast_mut()
            }
            Self::Value(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<Arc<Value>> for FieldValue {
    fn from(value: Arc<Value>) -> Self {
        Self::shared(value)
    }
}
