//! Path and level resolution by walking parent links

use crate::error::ApiError;
use crate::tree::node::CompartmentTree;
use crate::types::{CompartmentId, PathRecord};
use std::collections::{HashMap, HashSet};

/// Full path and depth of one compartment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: String,
    pub level: u32,
}

impl ResolvedPath {
    fn empty() -> Self {
        Self {
            path: String::new(),
            level: 0,
        }
    }

    fn child(&self, name: &str) -> Self {
        Self {
            path: format!("{}/{}", self.path, name),
            level: self.level + 1,
        }
    }
}

/// Resolves compartment paths against a [`CompartmentTree`].
///
/// Each id is resolved at most once; ancestors reached on the way are cached
/// so later lookups stop at the first resolved ancestor.
pub struct PathResolver<'a> {
    tree: &'a CompartmentTree,
    cache: HashMap<CompartmentId, ResolvedPath>,
}

impl<'a> PathResolver<'a> {
    pub fn new(tree: &'a CompartmentTree) -> Self {
        Self {
            tree,
            cache: HashMap::with_capacity(tree.len()),
        }
    }

    /// Resolve the root-to-node path and depth of `id`.
    ///
    /// - An id with no name entry resolves to an empty path at level 0.
    /// - A root (no parent, empty parent, or self parent) is its own name at level 0.
    /// - Anything else is its parent's path plus `/name`, one level deeper. A
    ///   parent id that is not in the tree contributes an empty path.
    ///
    /// Returns [`ApiError::CycleDetected`] if parent links loop without reaching a root.
    pub fn resolve(&mut self, id: &str) -> Result<ResolvedPath, ApiError> {
        if let Some(hit) = self.cache.get(id) {
            return Ok(hit.clone());
        }

        let tree = self.tree;
        let mut pending: Vec<(CompartmentId, &'a str)> = Vec::new();
        let mut seen: HashSet<CompartmentId> = HashSet::new();
        let mut current = id.to_string();

        let mut resolved = loop {
            if let Some(hit) = self.cache.get(&current) {
                break hit.clone();
            }
            let Some(name) = tree.name(&current) else {
                break ResolvedPath::empty();
            };
            match tree.effective_parent(&current) {
                None => {
                    let root = ResolvedPath {
                        path: name.to_string(),
                        level: 0,
                    };
                    self.cache.insert(current, root.clone());
                    break root;
                }
                Some(parent) => {
                    if !seen.insert(current.clone()) {
                        return Err(ApiError::CycleDetected(current));
                    }
                    let parent = parent.to_string();
                    pending.push((std::mem::replace(&mut current, parent), name));
                }
            }
        };

        while let Some((pending_id, name)) = pending.pop() {
            resolved = resolved.child(name);
            self.cache.insert(pending_id, resolved.clone());
        }

        Ok(resolved)
    }

    /// Resolve every compartment in the tree into a [`PathRecord`].
    ///
    /// Output order follows map iteration and carries no meaning.
    pub fn resolve_all(&mut self) -> Result<Vec<PathRecord>, ApiError> {
        let tree = self.tree;
        let mut records = Vec::with_capacity(tree.len());
        for id in tree.ids() {
            let ResolvedPath { path, level } = self.resolve(id)?;
            records.push(PathRecord {
                id: id.to_string(),
                parent_id: tree.parent_id(id).unwrap_or_default().to_string(),
                level,
                path,
            });
        }
        tracing::debug!(
            resolved = records.len(),
            cached = self.cache.len(),
            "Resolved compartment paths"
        );
        Ok(records)
    }
}
