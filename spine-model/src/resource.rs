//! The base resource entity and its dirty-tracking engine.
//!
//! Every declared field has a live value and, optionally, a snapshot of the
//! last value accepted as the clean server baseline. Dirtiness is decided in order:
//! 1. no snapshot at all (never loaded, or forced via [`Resource::mark_field`]): dirty;
//! 2. live value is a [`ResolvedCollection`](crate::ResolvedCollection): whatever the
//!    collection reports, the snapshot is not consulted;
//! 3. snapshot empty and live value empty: clean;
//! 4. otherwise dirty unless the live value is the same handle as the snapshot.
//!
//! Rule 4 compares handles, not contents: replacing a value with an equal
//! copy is a write.

use crate::{FieldDescriptor, FieldValue, ModelError, ModelResult, ResolvedCollection, ResourceSchema};
use serde_json::Value;
use spine_types::{Dictionary, RelationshipData, ResourceIdentifier};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Last value accepted as clean for one field.
#[derive(Debug, Clone)]
enum Snapshot {
    /// Explicitly observed as absent or `null`.
    Empty,
    Value(Arc<Value>),
    Collection,
}

impl Snapshot {
    fn of(value: Option<&FieldValue>) -> Self {
        match value {
            None => Self::Empty,
            Some(v) if v.is_empty() => Self::Empty,
            Some(FieldValue::Value(v)) => Self::Value(Arc::clone(v)),
            Some(FieldValue::Collection(_)) => Self::Collection,
        }
    }
}

/// A client-side representation of one server-side entity.
///
/// Construct with [`Resource::new`] for a placeholder reference, or
/// [`Resource::loaded`] to build a fully populated, clean instance in one step
/// so no caller ever observes a half-snapshotted resource.
///
/// Two resources are equal when their resource type and id match; location,
/// field values and load state do not participate.
#[derive(Debug)]
pub struct Resource {
    schema: Arc<ResourceSchema>,
    id: Option<String>,
    location: Option<Url>,
    is_loaded: bool,
    meta: Option<Dictionary>,
    relationships: BTreeMap<String, RelationshipData>,
    values: HashMap<String, FieldValue>,
    originals: HashMap<String, Snapshot>,
}

impl Resource {
    /// Creates an unloaded placeholder with no id and no snapshot.
    #[must_use]
    pub fn new(schema: Arc<ResourceSchema>) -> Self {
        Self {
            schema,
            id: None,
            location: None,
            is_loaded: false,
            meta: None,
            relationships: BTreeMap::new(),
            values: HashMap::new(),
            originals: HashMap::new(),
        }
    }

    /// Creates an unloaded placeholder that references an existing entity.
    #[must_use]
    pub fn with_id(schema: Arc<ResourceSchema>, id: impl Into<String>) -> Self {
        let mut resource = Self::new(schema);
        resource.id = Some(id.into());
        resource
    }

    /// Creates a loaded, clean resource from deserialized field values.
    pub fn loaded<I>(schema: Arc<ResourceSchema>, id: impl Into<String>, values: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (String, Option<FieldValue>)>,
    {
        let mut resource = Self::with_id(schema, id);
        resource.populate(values)?;
        Ok(resource)
    }

    // ── Identity ─────────────────────────────────────────────────

    #[must_use]
    pub fn schema(&self) -> &Arc<ResourceSchema> {
        &self.schema
    }

    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.schema.resource_type
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.schema.fields
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// The (type, id) identifier, once the server has assigned an id.
    #[must_use]
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id
            .as_ref()
            .map(|id| ResourceIdentifier::new(self.resource_type(), id.clone()))
    }

    #[must_use]
    pub fn location(&self) -> Option<&Url> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, location: Option<Url>) {
        self.location = location;
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn set_loaded(&mut self, is_loaded: bool) {
        self.is_loaded = is_loaded;
    }

    #[must_use]
    pub fn meta(&self) -> Option<&Dictionary> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: Option<Dictionary>) {
        self.meta = meta;
    }

    // ── Relationships ────────────────────────────────────────────

    #[must_use]
    pub fn relationships(&self) -> &BTreeMap<String, RelationshipData> {
        &self.relationships
    }

    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&RelationshipData> {
        self.relationships.get(name)
    }

    pub fn set_relationship(&mut self, name: impl Into<String>, data: RelationshipData) {
        self.relationships.insert(name.into(), data);
    }

    /// Decodes a `selfURL`/`relatedURL`/`data` dictionary and stores it under `name`.
    pub fn set_relationship_from_dictionary(
        &mut self,
        name: impl Into<String>,
        dict: &Dictionary,
    ) -> ModelResult<()> {
        let data = RelationshipData::from_dictionary(dict)?;
        self.relationships.insert(name.into(), data);
        Ok(())
    }

    pub fn remove_relationship(&mut self, name: &str) -> Option<RelationshipData> {
        self.relationships.remove(name)
    }

    pub(crate) fn replace_relationships(&mut self, relationships: BTreeMap<String, RelationshipData>) {
        self.relationships = relationships;
    }

    // ── Field access ─────────────────────────────────────────────

    /// Reads a declared field. `None` means the field is empty.
    pub fn value_for_field(&self, field: &str) -> ModelResult<Option<&FieldValue>> {
        self.check_field(field)?;
        Ok(self.values.get(field))
    }

    /// Writes a declared field and snapshots the written value as clean.
    ///
    /// This is the deserializer's path: a value loaded from the server is
    /// clean by definition. Use [`Resource::update_value`] for local edits.
    pub fn set_value(&mut self, field: &str, value: Option<FieldValue>) -> ModelResult<()> {
        self.check_field(field)?;
        self.store_clean(field, value);
        Ok(())
    }

    /// Writes a declared field without touching its snapshot.
    ///
    /// This is the local-mutation path; it makes the field dirty relative to
    /// the server baseline.
    pub fn update_value(&mut self, field: &str, value: Option<FieldValue>) -> ModelResult<()> {
        self.check_field(field)?;
        self.store(field, value);
        Ok(())
    }

    /// Borrows a field's resolved collection, if its live value is a `C`.
    pub fn collection<C: ResolvedCollection>(&self, field: &str) -> ModelResult<Option<&C>> {
        Ok(self.value_for_field(field)?.and_then(|v| v.as_collection::<C>()))
    }

    /// Mutably borrows a field's resolved collection, if its live value is a `C`.
    pub fn collection_mut<C: ResolvedCollection>(
        &mut self,
        field: &str,
    ) -> ModelResult<Option<&mut C>> {
        self.check_field(field)?;
        Ok(self
            .values
            .get_mut(field)
            .and_then(|v| v.as_collection_mut::<C>()))
    }

    fn store_clean(&mut self, field: &str, value: Option<FieldValue>) {
        self.originals
            .insert(field.to_owned(), Snapshot::of(value.as_ref()));
        self.store(field, value);
    }

    fn store(&mut self, field: &str, value: Option<FieldValue>) {
        match value {
            Some(v) => {
                self.values.insert(field.to_owned(), v);
            }
            None => {
                self.values.remove(field);
            }
        }
    }

    fn check_field(&self, field: &str) -> ModelResult<()> {
        if self.schema.declares(field) {
            Ok(())
        } else {
            Err(ModelError::UnknownField {
                resource_type: self.schema.resource_type.clone(),
                field: field.to_owned(),
            })
        }
    }

    // ── Dirty tracking ───────────────────────────────────────────

    /// Whether a declared field has diverged from its clean baseline.
    pub fn is_field_dirty(&self, field: &str) -> ModelResult<bool> {
        self.check_field(field)?;
        Ok(self.field_dirty(field))
    }

    /// True if any declared field is dirty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.schema.field_names().any(|f| self.field_dirty(f))
    }

    /// Names of dirty fields, in declaration order.
    #[must_use]
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.schema
            .field_names()
            .filter(|f| self.field_dirty(f))
            .collect()
    }

    fn field_dirty(&self, field: &str) -> bool {
        let Some(original) = self.originals.get(field) else {
            return true;
        };
        let live = self.values.get(field);
        if let Some(FieldValue::Collection(collection)) = live {
            return collection.is_dirty();
        }
        match (original, live) {
            (Snapshot::Empty, None) => false,
            (Snapshot::Empty, Some(v)) if v.is_empty() => false,
            (Snapshot::Value(original), Some(FieldValue::Value(v))) => !Arc::ptr_eq(original, v),
            _ => true,
        }
    }

    /// Forces a field dirty (`as_dirty = true`) by dropping its snapshot, or
    /// rebases it (`as_dirty = false`) by snapshotting the current value.
    pub fn mark_field(&mut self, field: &str, as_dirty: bool) -> ModelResult<()> {
        self.check_field(field)?;
        if as_dirty {
            self.originals.remove(field);
        } else {
            let snapshot = Snapshot::of(self.values.get(field));
            self.originals.insert(field.to_owned(), snapshot);
        }
        Ok(())
    }

    /// Snapshots every declared field's current value as clean.
    pub fn snapshot(&mut self) {
        let schema = Arc::clone(&self.schema);
        for field in schema.field_names() {
            let snapshot = Snapshot::of(self.values.get(field));
            self.originals.insert(field.to_owned(), snapshot);
        }
        debug!("Snapshotted {}", self);
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Assigns deserialized field values, snapshots every declared field, and
    /// marks the resource loaded. Fields not supplied are snapshotted at their
    /// current value.
    ///
    /// All names are checked before anything is written.
    pub fn populate<I>(&mut self, values: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (String, Option<FieldValue>)>,
    {
        let values: Vec<_> = values.into_iter().collect();
        for (field, _) in &values {
            self.check_field(field)?;
        }
        for (field, value) in values {
            self.store(&field, value);
        }
        self.snapshot();
        self.is_loaded = true;
        debug!("Populated {}", self);
        Ok(())
    }

    /// Empties every declared field and returns to the placeholder state.
    ///
    /// Each field is written empty through the snapshotting path, so an
    /// unloaded placeholder reads as clean. Identity and relationships are
    /// kept; a reload repopulates them.
    pub fn unload(&mut self) {
        let schema = Arc::clone(&self.schema);
        for field in schema.field_names() {
            self.store_clean(field, None);
        }
        self.is_loaded = false;
        debug!("Unloaded {}", self);
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.schema.resource_type == other.schema.resource_type && self.id == other.id
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema.resource_type.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}({})", self.schema.resource_type, id),
            None => write!(f, "{}(unsaved)", self.schema.resource_type),
        }
    }
}
