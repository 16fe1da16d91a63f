//! Id-keyed name and parent mappings for compartments

use crate::types::{CompartmentId, CompartmentRecord, ROOT_NAME};
use std::collections::HashMap;

/// Flat compartment mappings: id -> name and id -> parent id.
///
/// Both maps are only written through [`CompartmentTree::insert`], so every id
/// known to one map is known to the other. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct CompartmentTree {
    names: HashMap<CompartmentId, String>,
    parents: HashMap<CompartmentId, CompartmentId>,
}

impl CompartmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree seeded with the tenancy as its parentless root.
    pub fn with_root(tenancy_id: impl Into<CompartmentId>) -> Self {
        let mut tree = Self::new();
        tree.insert(CompartmentRecord::new(tenancy_id, ROOT_NAME, ""));
        tree
    }

    /// Record a compartment, replacing any earlier entry with the same id.
    pub fn insert(&mut self, record: CompartmentRecord) {
        self.names.insert(record.id.clone(), record.name);
        self.parents.insert(record.id, record.parent_id);
    }

    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = CompartmentRecord>,
    {
        for record in records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Raw parent id as recorded, including empty and self-referential values.
    pub fn parent_id(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Parent id to follow when walking toward the root.
    ///
    /// Returns `None` for roots: no parent entry, an empty parent id, or a
    /// parent id equal to the node's own id.
    pub fn effective_parent(&self, id: &str) -> Option<&str> {
        match self.parents.get(id) {
            Some(parent) if !parent.is_empty() && parent != id => Some(parent.as_str()),
            _ => None,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
