//! A resolved to-many relationship with pending link/unlink tracking.

use crate::ResolvedCollection;
use spine_types::{RelationshipData, ResourceIdentifier};

/// The resolved members of a to-many relationship.
///
/// Linking or unlinking a member records it as a pending addition or removal;
/// the collection is dirty while any change is pending. Linking a member that
/// is pending removal cancels the removal, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedResourceCollection {
    relationship: Option<RelationshipData>,
    members: Vec<ResourceIdentifier>,
    added: Vec<ResourceIdentifier>,
    removed: Vec<ResourceIdentifier>,
}

impl LinkedResourceCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clean collection seeded from a relationship's linkage.
    #[must_use]
    pub fn from_relationship(relationship: RelationshipData) -> Self {
        let members = relationship.identifiers.clone().unwrap_or_default();
        Self {
            relationship: Some(relationship),
            members,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// The relationship payload this collection was resolved from.
    #[must_use]
    pub fn relationship(&self) -> Option<&RelationshipData> {
        self.relationship.as_ref()
    }

    #[must_use]
    pub fn members(&self) -> &[ResourceIdentifier] {
        &self.members
    }

    #[must_use]
    pub fn added(&self) -> &[ResourceIdentifier] {
        &self.added
    }

    #[must_use]
    pub fn removed(&self) -> &[ResourceIdentifier] {
        &self.removed
    }

    #[must_use]
    pub fn contains(&self, identifier: &ResourceIdentifier) -> bool {
        self.members.contains(identifier)
    }

    /// Adds a member. No-op if it is already linked.
    pub fn link(&mut self, identifier: ResourceIdentifier) {
        if self.contains(&identifier) {
            return;
        }
        if let Some(pos) = self.removed.iter().position(|r| r == &identifier) {
            self.removed.remove(pos);
        } else {
            self.added.push(identifier.clone());
        }
        self.members.push(identifier);
    }

    /// Removes a member. No-op if it is not linked.
    pub fn unlink(&mut self, identifier: &ResourceIdentifier) {
        let Some(pos) = self.members.iter().position(|m| m == identifier) else {
            return;
        };
        let identifier = self.members.remove(pos);
        if let Some(pos) = self.added.iter().position(|a| a == &identifier) {
            self.added.remove(pos);
        } else {
            self.removed.push(identifier);
        }
    }

    /// Accepts all pending changes as the new baseline.
    pub fn mark_clean(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

impl ResolvedCollection for LinkedResourceCollection {
    fn is_dirty(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}
