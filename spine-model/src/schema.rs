use serde::{Deserialize, Serialize};

/// Describes a resource type: its name on the wire and the fields the
/// dirty-tracking engine reasons over.
///
/// A schema is shared by every instance of its type (see [`crate::Resource`])
/// and never changes per instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ResourceSchema {
    #[must_use]
    pub fn new(resource_type: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            resource_type: resource_type.into(),
            fields,
        }
    }

    /// Looks up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if `name` is one of this type's declared fields.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Declared relationship fields (to-one and to-many), in declaration order.
    pub fn relationship_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.kind.is_relationship())
    }
}

/// Static metadata naming one field of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a plain attribute field.
    #[must_use]
    pub fn attribute(name: &str) -> Self {
        Self::new(name, FieldKind::Attribute)
    }

    /// Shorthand for a to-one relationship field.
    #[must_use]
    pub fn to_one(name: &str) -> Self {
        Self::new(name, FieldKind::ToOne)
    }

    /// Shorthand for a to-many relationship field.
    #[must_use]
    pub fn to_many(name: &str) -> Self {
        Self::new(name, FieldKind::ToMany)
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Attribute,
    ToOne,
    ToMany,
}

impl FieldKind {
    #[must_use]
    pub fn is_relationship(self) -> bool {
        matches!(self, Self::ToOne | Self::ToMany)
    }
}
