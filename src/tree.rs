//! Compartment Tree
//!
//! Rebuilds the tenancy hierarchy from the flat, unordered records returned by
//! the listing API, resolves each compartment's full path and depth, and
//! restricts results to a subtree.

pub mod filter;
pub mod node;
pub mod path;

pub use filter::SubtreeFilter;
pub use node::CompartmentTree;
pub use path::{PathResolver, ResolvedPath};
