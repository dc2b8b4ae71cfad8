//! Core data structures for qub.
//!
//! This module contains the foundational types of the repository:
//! - Version numbers and project signatures
//! - `project.json` descriptors
//! - The on-disk repository and its latest-version selector

pub mod descriptor;
pub mod repository;
pub mod signature;
pub mod version;

pub use descriptor::{JavaMetadata, ProjectDescriptor, DESCRIPTOR_NAME};
pub use repository::{ArtifactKind, Layout, Repository, VersionFolder, VERSIONS_DIR};
pub use signature::ProjectSignature;
pub use version::{VersionNumber, VersionParseError};
