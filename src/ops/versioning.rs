//! Choosing the version a publish is stored under.

use crate::core::{ProjectDescriptor, Repository, VersionNumber, VersionParseError};

/// Version assigned when a project has no usable history.
pub fn initial_version() -> VersionNumber {
    VersionNumber::major(1)
}

/// Resolve the version to publish `descriptor` as.
///
/// A declared version is used as written, dotted or not, as long as it can
/// name a folder. Otherwise the latest stored version's
/// major component is incremented and every other component dropped, so
/// `2.7.1` is followed by `3`. With no history the version is `1`.
pub fn resolve_version(
    repo: &Repository,
    descriptor: &ProjectDescriptor,
) -> Result<VersionNumber, VersionParseError> {
    if let Some(declared) = descriptor.declared_version() {
        declared.check_folder_name()?;
        tracing::debug!("using declared version {}", declared);
        return Ok(declared);
    }

    let next = repo
        .latest_version(&descriptor.publisher, &descriptor.project)
        .and_then(|latest| {
            tracing::debug!("latest published version is {}", latest);
            latest.increment_major()
        })
        .unwrap_or_else(initial_version);

    Ok(next)
}
