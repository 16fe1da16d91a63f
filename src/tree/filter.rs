//! Subtree restriction by parent-chain ancestry

use crate::error::ApiError;
use crate::tree::node::CompartmentTree;
use crate::types::PathRecord;
use std::collections::HashSet;

/// Keeps only the records at or below one compartment.
///
/// Membership is decided by following parent links from each candidate toward
/// the root, never by comparing path strings, so a sibling named like a prefix
/// of the subtree root is not swept in.
pub struct SubtreeFilter<'a> {
    tree: &'a CompartmentTree,
    root_id: &'a str,
}

impl<'a> SubtreeFilter<'a> {
    /// Fails with [`ApiError::UnknownCompartment`] when `root_id` is not in the tree.
    pub fn new(tree: &'a CompartmentTree, root_id: &'a str) -> Result<Self, ApiError> {
        if !tree.contains(root_id) {
            return Err(ApiError::UnknownCompartment(root_id.to_string()));
        }
        Ok(Self { tree, root_id })
    }

    /// True when `candidate` is the subtree root or one of its descendants.
    pub fn contains(&self, candidate: &str) -> Result<bool, ApiError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = candidate;
        loop {
            if current == self.root_id {
                return Ok(true);
            }
            if !seen.insert(current) {
                return Err(ApiError::CycleDetected(current.to_string()));
            }
            match self.tree.effective_parent(current) {
                Some(parent) => current = parent,
                None => return Ok(false),
            }
        }
    }

    pub fn retain(&self, records: Vec<PathRecord>) -> Result<Vec<PathRecord>, ApiError> {
        let before = records.len();
        let mut kept = Vec::with_capacity(before);
        for record in records {
            if self.contains(&record.id)? {
                kept.push(record);
            }
        }
        tracing::info!(
            root = self.root_id,
            kept = kept.len(),
            dropped = before - kept.len(),
            "Applied subtree filter"
        );
        Ok(kept)
    }
}
