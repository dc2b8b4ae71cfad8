//! High-level operations.
//!
//! This module contains the implementation of qub commands.

pub mod dependents;
pub mod launcher;
pub mod pack;
pub mod publish;
pub mod versioning;

pub use dependents::find_dependents;
pub use launcher::{write_launcher, Launcher, LauncherStyle};
pub use pack::{CommandPacker, PackArtifacts, PackOutcome, Packer, PrebuiltPacker};
pub use publish::{
    publish, require_repository, PublishEngine, PublishError, PublishOptions, PublishReport,
    PublishState,
};
pub use versioning::resolve_version;
