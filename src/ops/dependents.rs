//! Reverse-dependency scan.

use crate::core::{ProjectSignature, Repository};

/// Stored packages whose latest version depends on `publisher/project`.
///
/// Only the latest version of each project is consulted, and the version
/// the dependent asks for is ignored: a dependent on an older release is
/// exactly what should be reported. Projects without a readable descriptor
/// are skipped. The project itself is never its own dependent.
pub fn find_dependents(repo: &Repository, publisher: &str, project: &str) -> Vec<ProjectSignature> {
    let mut dependents = Vec::new();

    for other_publisher in repo.publishers() {
        for other_project in repo.projects(&other_publisher) {
            if other_publisher == publisher && other_project == project {
                continue;
            }

            let Some(folder) = repo.latest_version_folder(&other_publisher, &other_project) else {
                continue;
            };
            let Some(descriptor) = repo.descriptor_in(&folder) else {
                continue;
            };

            if descriptor.depends_on(publisher, project) {
                tracing::debug!(
                    "{}/{}@{} depends on {}/{}",
                    other_publisher,
                    other_project,
                    folder.version,
                    publisher,
                    project
                );
                dependents.push(ProjectSignature::new(
                    other_publisher.clone(),
                    other_project,
                    folder.version,
                ));
            }
        }
    }

    dependents
}
