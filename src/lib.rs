//! qub - publishing for a local package repository
//!
//! This crate provides the core library functionality for qub: the
//! repository layout, version selection, dependency resolution and the
//! publish engine that stores a packed project.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for qub unit tests.
///
/// Only compiled for tests. Provides on-disk repository and project
/// fixtures and an output capture buffer.
#[cfg(test)]
pub mod test_support;

pub use core::{
    descriptor::ProjectDescriptor, repository::Repository, signature::ProjectSignature,
    version::VersionNumber,
};

pub use resolver::DependencyGraph;
pub use util::context::GlobalContext;
