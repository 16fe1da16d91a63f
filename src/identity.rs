//! OCI Identity Access
//!
//! Credential loading, request signing, and the paginated compartment listing
//! that feeds the tree builder.

pub mod client;
pub mod profile;
pub mod signer;
pub mod source;

pub use client::{AccessLevel, IdentityClient, ListOptions};
pub use profile::{OciProfile, DEFAULT_PROFILE};
pub use signer::{RequestSigner, SignedHeaders};
pub use source::{collect_compartments, CompartmentListing, CompartmentPage, CompartmentSource};
