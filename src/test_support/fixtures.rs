//! On-disk fixtures for repositories and projects.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::{
    ArtifactKind, JavaMetadata, ProjectDescriptor, ProjectSignature, Repository, VersionNumber,
    DESCRIPTOR_NAME, VERSIONS_DIR,
};

/// Shorthand for a signature with a single-component version.
pub fn sig(publisher: &str, project: &str, version: u64) -> ProjectSignature {
    ProjectSignature::new(publisher, project, VersionNumber::major(version))
}

/// A descriptor for `signature` declaring `deps` as its dependencies.
pub fn descriptor_for(signature: &ProjectSignature, deps: &[ProjectSignature]) -> ProjectDescriptor {
    let mut descriptor = ProjectDescriptor::new(&signature.publisher, &signature.project);
    if signature.version.any() {
        descriptor = descriptor.with_version(signature.version.to_string());
    }
    if !deps.is_empty() {
        descriptor = descriptor.with_java(JavaMetadata {
            dependencies: Some(deps.to_vec()),
            ..JavaMetadata::default()
        });
    }
    descriptor
}

/// A repository rooted in a temp dir.
pub struct RepoFixture {
    dir: TempDir,
}

impl RepoFixture {
    pub fn new() -> Self {
        RepoFixture {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn repository(&self) -> Repository {
        Repository::new(self.dir.path())
    }

    /// Store a package under `<pub>/<proj>/versions/<version>/`.
    pub fn publish_nested(
        &self,
        signature: &ProjectSignature,
        deps: &[ProjectSignature],
    ) -> PathBuf {
        let folder = self
            .root()
            .join(&signature.publisher)
            .join(&signature.project)
            .join(VERSIONS_DIR)
            .join(signature.version.to_string());
        self.store(&folder, &descriptor_for(signature, deps));
        folder
    }

    /// Store a package under `<pub>/<proj>/<version>/`.
    pub fn publish_flat(&self, signature: &ProjectSignature, deps: &[ProjectSignature]) -> PathBuf {
        let folder = self
            .root()
            .join(&signature.publisher)
            .join(&signature.project)
            .join(signature.version.to_string());
        self.store(&folder, &descriptor_for(signature, deps));
        folder
    }

    /// Create an empty folder relative to the root.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a raw file relative to the root.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn store(&self, folder: &Path, descriptor: &ProjectDescriptor) {
        std::fs::create_dir_all(folder).unwrap();
        std::fs::write(
            folder.join(DESCRIPTOR_NAME),
            descriptor.to_json_pretty().unwrap(),
        )
        .unwrap();
        for kind in [ArtifactKind::Compiled, ArtifactKind::Sources] {
            std::fs::write(
                folder.join(kind.file_name(&descriptor.project)),
                format!("{} {}", descriptor.project, kind),
            )
            .unwrap();
        }
    }
}

impl Default for RepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A project folder with a `project.json` and an `outputs/` folder.
pub struct ProjectFixture {
    dir: TempDir,
    pub descriptor: ProjectDescriptor,
}

impl ProjectFixture {
    /// Write `descriptor` as the project's `project.json`.
    pub fn new(descriptor: ProjectDescriptor) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DESCRIPTOR_NAME),
            descriptor.to_json_pretty().unwrap(),
        )
        .unwrap();
        ProjectFixture { dir, descriptor }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn outputs(&self) -> PathBuf {
        self.dir.path().join("outputs")
    }

    /// Write the compiled and sources artifacts, plus tests when asked.
    pub fn with_outputs(self, tests: bool) -> Self {
        let outputs = self.outputs();
        std::fs::create_dir_all(&outputs).unwrap();

        for kind in ArtifactKind::ALL {
            if kind == ArtifactKind::Tests && !tests {
                continue;
            }
            std::fs::write(
                outputs.join(kind.file_name(&self.descriptor.project)),
                format!("fresh {}", kind),
            )
            .unwrap();
        }
        self
    }
}
