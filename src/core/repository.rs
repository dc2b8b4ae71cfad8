//! On-disk package repository.
//!
//! The repository root is partitioned as `<publisher>/<project>/...`. Two
//! layouts exist for version folders:
//!
//! - nested: `<publisher>/<project>/versions/<version>/` (written by publish)
//! - flat:   `<publisher>/<project>/<version>/` (older repositories)
//!
//! Both are read. Direct lookups try the nested layout first, and when both
//! layouts hold the same version folder name the nested one wins.
//!
//! Each version folder owns a `project.json`, a compiled artifact, a sources
//! artifact and optionally a tests artifact.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::core::descriptor::{ProjectDescriptor, DESCRIPTOR_NAME};
use crate::core::signature::ProjectSignature;
use crate::core::version::VersionNumber;

/// Intermediate folder of the nested layout.
pub const VERSIONS_DIR: &str = "versions";

/// The kinds of artifact stored in a version folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Compiled classes archive (`<project>.jar`)
    Compiled,
    /// Sources archive (`<project>.sources.jar`)
    Sources,
    /// Tests archive (`<project>.tests.jar`), optional
    Tests,
}

impl ArtifactKind {
    /// All kinds, in copy order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Compiled,
        ArtifactKind::Sources,
        ArtifactKind::Tests,
    ];

    /// File name of this artifact for a project.
    pub fn file_name(&self, project: &str) -> String {
        match self {
            ArtifactKind::Compiled => format!("{}.jar", project),
            ArtifactKind::Sources => format!("{}.sources.jar", project),
            ArtifactKind::Tests => format!("{}.tests.jar", project),
        }
    }

    /// Short name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Compiled => "compiled",
            ArtifactKind::Sources => "sources",
            ArtifactKind::Tests => "tests",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which on-disk layout a version folder was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layout {
    /// `<project>/<version>/`
    Flat,
    /// `<project>/versions/<version>/`
    Nested,
}

/// A version folder that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFolder {
    /// Folder name as found on disk
    pub name: String,
    /// Parsed folder name
    pub version: VersionNumber,
    /// Absolute path of the folder
    pub path: PathBuf,
    /// Layout the folder was found in
    pub layout: Layout,
}

impl VersionFolder {
    /// Path of an artifact inside this folder.
    pub fn artifact(&self, kind: ArtifactKind, project: &str) -> PathBuf {
        self.path.join(kind.file_name(project))
    }

    /// Path of the descriptor inside this folder.
    pub fn descriptor_path(&self) -> PathBuf {
        self.path.join(DESCRIPTOR_NAME)
    }

    /// Ordering used by the latest-version selector.
    ///
    /// Versions compare numerically; equal versions prefer the nested layout,
    /// then the lexically greatest folder name.
    fn selection_cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.layout.cmp(&other.layout))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Handle to a repository root. Cheap to clone; holds no cached state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Open a repository rooted at `root`. The folder need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Repository { root: root.into() }
    }

    /// The repository root folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<publisher>`
    pub fn publisher_folder(&self, publisher: &str) -> PathBuf {
        self.root.join(publisher)
    }

    /// `<root>/<publisher>/<project>`
    pub fn project_folder(&self, publisher: &str, project: &str) -> PathBuf {
        self.publisher_folder(publisher).join(project)
    }

    /// Folder a version is published into. Pure path computation.
    pub fn project_version_folder(
        &self,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> PathBuf {
        self.project_folder(publisher, project)
            .join(VERSIONS_DIR)
            .join(version.to_string())
    }

    /// Version folder path in the flat layout. Pure path computation.
    pub fn flat_version_folder(
        &self,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> PathBuf {
        self.project_folder(publisher, project)
            .join(version.to_string())
    }

    /// Artifact path in the folder a version is published into.
    pub fn artifact_file(
        &self,
        kind: ArtifactKind,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> PathBuf {
        self.project_version_folder(publisher, project, version)
            .join(kind.file_name(project))
    }

    /// Look up an existing version folder.
    ///
    /// A folder named exactly like `version` wins, nested layout first.
    /// Otherwise any folder whose name parses to an equal version is
    /// returned, so `1.0` finds a stored `1` and `1` finds a legacy `01`.
    /// An empty version, or one that can't name a folder, finds nothing.
    pub fn find_version_folder(
        &self,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> Option<VersionFolder> {
        if version.check_folder_name().is_err() {
            tracing::debug!("{}/{}@{} can't name a folder", publisher, project, version);
            return None;
        }

        let candidates = [
            (
                Layout::Nested,
                self.project_version_folder(publisher, project, version),
            ),
            (
                Layout::Flat,
                self.flat_version_folder(publisher, project, version),
            ),
        ];

        let exact = candidates
            .into_iter()
            .find(|(_, path)| path.is_dir())
            .map(|(layout, path)| VersionFolder {
                name: version.to_string(),
                version: version.clone(),
                path,
                layout,
            });

        let found = exact.or_else(|| {
            self.version_folders(publisher, project)
                .into_iter()
                .filter(|folder| folder.version == *version)
                .max_by(VersionFolder::selection_cmp)
        });

        if let Some(ref folder) = found {
            tracing::debug!(
                "found {}/{}@{} at {}",
                publisher,
                project,
                version,
                folder.path.display()
            );
        }
        found
    }

    /// Whether a folder holding `version`, or a version equal to it, exists
    /// in either layout.
    pub fn version_folder_exists(
        &self,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> bool {
        self.find_version_folder(publisher, project, version)
            .is_some()
    }

    /// All parseable version folders of a project, both layouts, ascending.
    ///
    /// Folder names that don't parse as a version are skipped. When the same
    /// folder name exists in both layouts only the nested one is returned.
    pub fn version_folders(&self, publisher: &str, project: &str) -> Vec<VersionFolder> {
        let project_folder = self.project_folder(publisher, project);
        let mut by_name: HashMap<String, VersionFolder> = HashMap::new();

        let layouts = [
            (Layout::Flat, project_folder.clone()),
            (Layout::Nested, project_folder.join(VERSIONS_DIR)),
        ];

        for (layout, parent) in layouts {
            for name in subfolder_names(&parent) {
                let Ok(version) = VersionNumber::parse(&name) else {
                    continue;
                };
                if !version.any() {
                    continue;
                }
                let folder = VersionFolder {
                    path: parent.join(&name),
                    name: name.clone(),
                    version,
                    layout,
                };
                // Nested is visited last so it replaces a flat duplicate.
                by_name.insert(name, folder);
            }
        }

        let mut folders: Vec<VersionFolder> = by_name.into_values().collect();
        folders.sort_by(VersionFolder::selection_cmp);
        folders
    }

    /// The folder holding the greatest published version of a project.
    pub fn latest_version_folder(&self, publisher: &str, project: &str) -> Option<VersionFolder> {
        self.version_folders(publisher, project)
            .into_iter()
            .max_by(VersionFolder::selection_cmp)
    }

    /// The greatest published version of a project.
    pub fn latest_version(&self, publisher: &str, project: &str) -> Option<VersionNumber> {
        self.latest_version_folder(publisher, project)
            .map(|f| f.version)
    }

    /// Publisher names, read from disk on each call.
    pub fn publishers(&self) -> impl Iterator<Item = String> + '_ {
        subfolder_names(&self.root)
    }

    /// Project names of a publisher, read from disk on each call.
    pub fn projects(&self, publisher: &str) -> impl Iterator<Item = String> + '_ {
        subfolder_names(&self.publisher_folder(publisher))
    }

    /// Read the descriptor stored for a version.
    ///
    /// Missing or malformed descriptors are reported as `None`.
    pub fn descriptor(
        &self,
        publisher: &str,
        project: &str,
        version: &VersionNumber,
    ) -> Option<ProjectDescriptor> {
        let folder = self.find_version_folder(publisher, project, version)?;
        self.descriptor_in(&folder)
    }

    /// Read the descriptor stored in a version folder.
    pub fn descriptor_in(&self, folder: &VersionFolder) -> Option<ProjectDescriptor> {
        let path = folder.descriptor_path();
        if !path.is_file() {
            tracing::debug!("no descriptor at {}", path.display());
            return None;
        }

        match ProjectDescriptor::load(&path) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                tracing::warn!("ignoring unreadable descriptor: {:#}", e);
                None
            }
        }
    }

    /// Signature of the latest published version of a project.
    pub fn latest_signature(&self, publisher: &str, project: &str) -> Option<ProjectSignature> {
        self.latest_version(publisher, project)
            .map(|version| ProjectSignature::new(publisher, project, version))
    }

    /// Path of `path` relative to the repository root, `/`-separated.
    ///
    /// Paths outside the root are returned as given.
    pub fn relative_path(&self, path: &Path) -> String {
        let relative = crate::util::fs::relative_path(&self.root, path);
        if relative.is_absolute() {
            return relative.display().to_string();
        }

        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Names of the immediate, non-hidden subfolders of `parent`, sorted.
///
/// A missing or unreadable folder yields nothing.
fn subfolder_names(parent: &Path) -> impl Iterator<Item = String> {
    WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
}
