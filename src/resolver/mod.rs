//! Dependency resolution.
//!
//! Resolution here is exact: every dependency names a published version, so
//! there is no version solving, only a depth-first walk of the descriptors
//! stored in the repository.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::DependencyGraph;

use crate::core::{ProjectSignature, Repository};

/// Transitive closure of `direct`, in classpath order, `root` excluded.
pub fn resolve_closure(
    repo: &Repository,
    root: &ProjectSignature,
    direct: &[ProjectSignature],
) -> Result<Vec<ProjectSignature>, ResolveError> {
    DependencyGraph::resolve(repo, root, direct).map(|graph| graph.closure())
}
