//! Visited registry: the shared URL -> resource store
//!
//! The registry is the only mutable structure with concurrent writers during
//! a run. Claiming and checking are one atomic step, which is what makes the
//! whole traversal safe to fan out.

mod resource;
mod visited;

pub use visited::{Registry, RegistryStats};
pub use resource::{Resource, ResourceKind};
