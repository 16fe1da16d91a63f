//! Core types for compartment path export.

/// CompartmentId: opaque OCID of a compartment or tenancy
pub type CompartmentId = String;

/// Synthetic display name given to the tenancy root
pub const ROOT_NAME: &str = "ROOT";

/// A single compartment as returned by the listing API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompartmentRecord {
    pub id: CompartmentId,
    pub name: String,
    /// Parent compartment id; empty or equal to `id` for the root
    pub parent_id: CompartmentId,
}

impl CompartmentRecord {
    pub fn new(
        id: impl Into<CompartmentId>,
        name: impl Into<String>,
        parent_id: impl Into<CompartmentId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.into(),
        }
    }
}

/// Resolved position of a compartment in the tenancy tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    pub id: CompartmentId,
    pub parent_id: CompartmentId,
    /// Ancestor hops to the root; the root is 0
    pub level: u32,
    /// Root-to-node names joined by "/"
    pub path: String,
}
