//! Implementation of `qub publish`.
//!
//! A publish moves through a fixed sequence of states:
//!
//! ```text
//! Packing -> Resolving -> GuardingExistence -> Copying
//!         -> GeneratingLauncher (entry point only) -> ScanningDependents -> Done
//! ```
//!
//! Any state can fail. Nothing in the repository is written before
//! `Copying`, and `Copying` stages the version folder beside its final
//! location and renames it into place, so a failed publish leaves no
//! version folder behind.
//!
//! Two publishers racing for the same version can both pass the existence
//! guard; the second rename then fails or loses. There is no lock.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::{
    ArtifactKind, ProjectDescriptor, ProjectSignature, Repository, VersionParseError,
    DESCRIPTOR_NAME,
};
use crate::ops::dependents::find_dependents;
use crate::ops::launcher::{write_launcher, Launcher, LauncherStyle};
use crate::ops::pack::{PackArtifacts, PackOutcome, Packer};
use crate::ops::versioning::resolve_version;
use crate::resolver::{resolve_closure, ResolveError};
use crate::util::fs::{copy_file, ensure_dir, rename_dir};
use crate::util::hash::sha256_file;
use crate::util::shell::{Shell, Status};

/// Errors reported to the user as a single `ERROR:` line.
#[derive(Debug, Error, Diagnostic)]
pub enum PublishError {
    #[error("Can't publish without a QUB_HOME environment variable.")]
    #[diagnostic(
        code(qub::publish::no_repository),
        help("Set QUB_HOME, pass --repository, or add `[repository] root` to ~/.qub/config.toml")
    )]
    MissingRepository,

    #[error("packing failed with exit code {exit_code}")]
    #[diagnostic(code(qub::publish::pack_failed))]
    PackFailed { exit_code: i32 },

    #[error("invalid version `{text}` in project.json: {source}")]
    #[diagnostic(
        code(qub::publish::invalid_version),
        help("A version names its folder in the repository, e.g. `7.3.1` or `1.0-beta`")
    )]
    InvalidVersion {
        text: String,
        #[source]
        source: VersionParseError,
    },

    #[error(
        "This package ({publisher}/{project}:{version}) can't be published because a package with that signature already exists."
    )]
    #[diagnostic(
        code(qub::publish::already_exists),
        help("Published versions are never overwritten; bump `version` in project.json or remove it")
    )]
    AlreadyExists {
        publisher: String,
        project: String,
        version: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{0:#}")]
    #[diagnostic(code(qub::publish::io))]
    Io(anyhow::Error),
}

impl From<anyhow::Error> for PublishError {
    fn from(err: anyhow::Error) -> Self {
        PublishError::Io(err)
    }
}

impl PublishError {
    fn already_exists(signature: &ProjectSignature) -> Self {
        PublishError::AlreadyExists {
            publisher: signature.publisher.clone(),
            project: signature.project.clone(),
            version: signature.version.to_string(),
        }
    }

    /// Whether the failing step already reported this error itself.
    ///
    /// A failed pack has printed its own output, so no `ERROR:` line is
    /// added for it.
    pub fn is_reported_upstream(&self) -> bool {
        matches!(self, PublishError::PackFailed { .. })
    }

    /// Process exit code for this error.
    ///
    /// A failed pack exits with the pipeline's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::PackFailed { exit_code } => *exit_code,
            _ => 1,
        }
    }
}

/// Open the repository at `root`, or fail when none is configured.
pub fn require_repository(root: Option<PathBuf>) -> Result<Repository, PublishError> {
    root.filter(|r| !r.as_os_str().is_empty())
        .map(Repository::new)
        .ok_or(PublishError::MissingRepository)
}

/// Options for the publish command.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Folder holding project.json and outputs/
    pub project_root: PathBuf,

    /// Shell dialect of the launcher script
    pub launcher_style: LauncherStyle,
}

/// States of a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Packing,
    Resolving,
    GuardingExistence,
    Copying,
    GeneratingLauncher,
    ScanningDependents,
    Done,
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishState::Packing => "packing",
            PublishState::Resolving => "resolving",
            PublishState::GuardingExistence => "guarding existence",
            PublishState::Copying => "copying",
            PublishState::GeneratingLauncher => "generating launcher",
            PublishState::ScanningDependents => "scanning dependents",
            PublishState::Done => "done",
        };
        f.write_str(name)
    }
}

/// A stored artifact and its checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedArtifact {
    pub kind: &'static str,
    pub path: PathBuf,
    pub sha256: String,
}

/// What a successful publish did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub signature: ProjectSignature,
    pub version_folder: PathBuf,
    pub artifacts: Vec<PublishedArtifact>,
    pub launcher: Option<PathBuf>,
    pub dependents: Vec<ProjectSignature>,
}

impl PublishReport {
    /// JSON event for `--message-format json`.
    pub fn to_json_event(&self) -> serde_json::Value {
        serde_json::json!({
            "reason": "published",
            "package": self.signature.to_string(),
            "report": self,
        })
    }
}

/// Drives one publish through its states.
pub struct PublishEngine<'a> {
    repo: &'a Repository,
    packer: &'a dyn Packer,
    shell: &'a Shell,
    state: PublishState,
}

impl<'a> PublishEngine<'a> {
    pub fn new(repo: &'a Repository, packer: &'a dyn Packer, shell: &'a Shell) -> Self {
        PublishEngine {
            repo,
            packer,
            shell,
            state: PublishState::Packing,
        }
    }

    /// The state the engine is in, or failed in.
    pub fn state(&self) -> PublishState {
        self.state
    }

    fn enter(&mut self, state: PublishState) {
        tracing::debug!("publish: {} -> {}", self.state, state);
        self.state = state;
    }

    /// Publish the project at `opts.project_root`.
    pub fn run(&mut self, opts: &PublishOptions) -> Result<PublishReport, PublishError> {
        let result = self.drive(opts);
        if let Err(ref e) = result {
            tracing::info!("publish failed while {}: {}", self.state, e);
        }
        result
    }

    fn drive(&mut self, opts: &PublishOptions) -> Result<PublishReport, PublishError> {
        let repo = self.repo;
        let descriptor_path = opts.project_root.join(DESCRIPTOR_NAME);

        self.enter(PublishState::Packing);
        self.shell.status(Status::Packing, self.packer.describe());
        let descriptor = ProjectDescriptor::load(&descriptor_path)?;
        let artifacts = match self.packer.pack(&opts.project_root, &descriptor)? {
            PackOutcome::Packed(artifacts) => artifacts,
            PackOutcome::Failed { exit_code } => {
                return Err(PublishError::PackFailed { exit_code });
            }
        };
        // Packing may have regenerated project.json.
        let descriptor = ProjectDescriptor::load(&descriptor_path)?;

        self.enter(PublishState::Resolving);
        let version =
            resolve_version(repo, &descriptor).map_err(|source| PublishError::InvalidVersion {
                text: descriptor.version.clone().unwrap_or_default(),
                source,
            })?;
        let signature = ProjectSignature::new(&descriptor.publisher, &descriptor.project, version);

        self.enter(PublishState::GuardingExistence);
        self.guard(&signature)?;

        // Resolve before writing so a dependency cycle leaves nothing behind.
        let launcher = match descriptor.main_class() {
            Some(main_class) => {
                self.shell.status(Status::Resolving, &signature);
                let closure = resolve_closure(repo, &signature, descriptor.dependencies())?;
                for dep in unpublished_dependencies(repo, &closure) {
                    self.shell.warn(format_args!("{} is not published", dep));
                }
                let launcher = Launcher::for_package(
                    repo,
                    descriptor.shortcut_name(),
                    main_class,
                    &signature,
                    &closure,
                )
                .capture_vm_arguments(descriptor.capture_vm_arguments());
                Some(launcher)
            }
            None => None,
        };

        self.enter(PublishState::Copying);
        self.shell.line(format!("Publishing {}...", signature));
        let version_folder = self.copy(&signature, &descriptor_path, &artifacts)?;

        let mut launcher_path = None;
        if let Some(launcher) = launcher {
            self.enter(PublishState::GeneratingLauncher);
            self.shell
                .status(Status::Writing, launcher.file_name(&opts.launcher_style));
            launcher_path = Some(write_launcher(repo, &launcher, &opts.launcher_style)?);
        }

        self.enter(PublishState::ScanningDependents);
        self.shell.status(Status::Scanning, repo.root().display());
        let dependents = find_dependents(repo, &signature.publisher, &signature.project);
        if !dependents.is_empty() {
            self.shell.line(format!(
                "The following projects should be updated to use {}:",
                signature
            ));
            for dependent in &dependents {
                self.shell.line(format!("  {}", dependent));
            }
        }

        let artifacts = ArtifactKind::ALL
            .into_iter()
            .map(|kind| (kind, version_folder.join(kind.file_name(&signature.project))))
            .filter(|(_, path)| path.is_file())
            .map(|(kind, path)| -> anyhow::Result<PublishedArtifact> {
                Ok(PublishedArtifact {
                    kind: kind.as_str(),
                    sha256: sha256_file(&path)?,
                    path,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.enter(PublishState::Done);
        self.shell.status(Status::Published, &signature);

        Ok(PublishReport {
            signature,
            version_folder,
            artifacts,
            launcher: launcher_path,
            dependents,
        })
    }

    fn guard(&self, signature: &ProjectSignature) -> Result<(), PublishError> {
        if self.repo.version_folder_exists(
            &signature.publisher,
            &signature.project,
            &signature.version,
        ) {
            return Err(PublishError::already_exists(signature));
        }
        Ok(())
    }

    /// Stage the version folder next to its final path and move it in.
    fn copy(
        &self,
        signature: &ProjectSignature,
        descriptor_path: &Path,
        artifacts: &PackArtifacts,
    ) -> Result<PathBuf, PublishError> {
        let target = self.repo.project_version_folder(
            &signature.publisher,
            &signature.project,
            &signature.version,
        );
        let parent = target
            .parent()
            .with_context(|| format!("no parent folder for {}", target.display()))?;
        ensure_dir(parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)
            .with_context(|| format!("failed to create staging folder in {}", parent.display()))?;

        copy_file(descriptor_path, &staging.path().join(DESCRIPTOR_NAME))?;
        for (kind, source) in artifacts.iter() {
            self.shell.status(Status::Copying, source.display());
            copy_file(source, &staging.path().join(kind.file_name(&signature.project)))?;
        }
        if artifacts.tests.is_none() {
            tracing::debug!("no tests artifact for {}", signature);
        }

        // Someone may have published the same version while we copied.
        self.guard(signature)?;
        rename_dir(staging.path(), &target)?;
        // `staging` now points at a path that no longer exists; dropping it
        // is a no-op.
        drop(staging);

        tracing::info!("published {} to {}", signature, target.display());
        Ok(target)
    }
}

/// Dependencies in `closure` with no version folder in `repo`.
pub fn unpublished_dependencies<'c>(
    repo: &Repository,
    closure: &'c [ProjectSignature],
) -> Vec<&'c ProjectSignature> {
    closure
        .iter()
        .filter(|dep| !repo.version_folder_exists(&dep.publisher, &dep.project, &dep.version))
        .collect()
}

/// Publish the project at `opts.project_root` into `repo`.
pub fn publish(
    repo: &Repository,
    packer: &dyn Packer,
    shell: &Shell,
    opts: &PublishOptions,
) -> Result<PublishReport, PublishError> {
    PublishEngine::new(repo, packer, shell).run(opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JavaMetadata, VersionNumber};
    use crate::ops::pack::PrebuiltPacker;
    use crate::test_support::{descriptor_for, sig, ProjectFixture, RepoFixture, SharedBuffer};
    use crate::util::shell::{ColorChoice, ShellMode, Verbosity};

    struct FailingPacker(i32);

    impl Packer for FailingPacker {
        fn describe(&self) -> String {
            "failing".into()
        }

        fn pack(&self, _: &Path, _: &ProjectDescriptor) -> anyhow::Result<PackOutcome> {
            Ok(PackOutcome::Failed { exit_code: self.0 })
        }
    }

    fn shell() -> (Shell, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let mode = ShellMode::Human {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Never,
        };
        (Shell::with_output(mode, Box::new(buffer.clone())), buffer)
    }

    fn options(project: &ProjectFixture) -> PublishOptions {
        PublishOptions {
            project_root: project.root().to_path_buf(),
            launcher_style: LauncherStyle::default(),
        }
    }

    fn run(
        repo: &RepoFixture,
        project: &ProjectFixture,
    ) -> (Result<PublishReport, PublishError>, Vec<String>) {
        let (shell, out) = shell();
        let result = publish(&repo.repository(), &PrebuiltPacker, &shell, &options(project));
        (result, out.lines())
    }

    fn with_main(descriptor: ProjectDescriptor, main: &str, shortcut: Option<&str>) -> ProjectDescriptor {
        let mut java = descriptor.java.clone().unwrap_or_default();
        java.main_class = Some(main.into());
        java.shortcut_name = shortcut.map(str::to_string);
        descriptor.with_java(java)
    }

    /// Every file under `root`, with its contents.
    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| (e.path().to_path_buf(), std::fs::read(e.path()).unwrap()))
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_publish_without_entry_point() {
        let repo = RepoFixture::new();
        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("1"),
        )
        .with_outputs(false);

        let (result, lines) = run(&repo, &project);
        let report = result.unwrap();

        let folder = repo.root().join("me/my-project/versions/1");
        assert_eq!(report.version_folder, folder);
        assert!(folder.join("project.json").is_file());
        assert!(folder.join("my-project.jar").is_file());
        assert!(folder.join("my-project.sources.jar").is_file());
        assert!(!folder.join("my-project.tests.jar").exists());
        assert_eq!(report.artifacts.len(), 2);
        assert_eq!(report.launcher, None);
        assert!(!repo.root().join("my-project.cmd").exists());
        assert_eq!(lines, vec!["Publishing me/my-project@1..."]);
    }

    #[test]
    fn test_publish_copies_tests_artifact() {
        let repo = RepoFixture::new();
        let project =
            ProjectFixture::new(ProjectDescriptor::new("me", "my-project")).with_outputs(true);

        let report = run(&repo, &project).0.unwrap();
        assert_eq!(report.artifacts.len(), 3);
        assert_eq!(report.artifacts[2].kind, "tests");
        assert_eq!(
            report.artifacts[0].sha256,
            crate::util::hash::sha256_bytes(b"fresh compiled")
        );
    }

    #[test]
    fn test_publish_writes_launcher() {
        let repo = RepoFixture::new();
        let descriptor = with_main(
            ProjectDescriptor::new("me", "my-project").with_version("1"),
            "A",
            Some("foo"),
        );
        let project = ProjectFixture::new(descriptor).with_outputs(false);

        let report = run(&repo, &project).0.unwrap();

        let script = repo.root().join("foo.cmd");
        assert_eq!(report.launcher, Some(script.clone()));
        assert_eq!(
            std::fs::read_to_string(script).unwrap(),
            "@echo OFF\njava -classpath %~dp0me/my-project/versions/1/my-project.jar A %*\n"
        );
    }

    #[test]
    fn test_launcher_has_transitive_closure_without_duplicates() {
        let repo = RepoFixture::new();
        repo.publish_nested(&sig("me", "b", 1), &[sig("me", "c", 1)]);
        repo.publish_nested(&sig("me", "c", 1), &[]);

        let descriptor = with_main(
            descriptor_for(&sig("me", "a", 1), &[sig("me", "b", 1), sig("me", "c", 1)]),
            "a.Main",
            None,
        );
        let project = ProjectFixture::new(descriptor).with_outputs(false);

        run(&repo, &project).0.unwrap();

        let script = std::fs::read_to_string(repo.root().join("a.cmd")).unwrap();
        assert!(script.contains(
            "%~dp0me/a/versions/1/a.jar;%~dp0me/b/versions/1/b.jar;%~dp0me/c/versions/1/c.jar a.Main"
        ));
    }

    #[test]
    fn test_auto_version_increments() {
        let repo = RepoFixture::new();
        repo.publish_flat(&sig("me", "my-project", 3), &[]);
        let project =
            ProjectFixture::new(ProjectDescriptor::new("me", "my-project")).with_outputs(false);

        let report = run(&repo, &project).0.unwrap();
        assert_eq!(report.signature.version, VersionNumber::major(4));
    }

    #[test]
    fn test_existing_version_is_untouched() {
        let repo = RepoFixture::new();
        repo.publish_flat(&sig("me", "my-project", 1), &[]);
        let before = snapshot(repo.root());

        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("1"),
        )
        .with_outputs(false);
        let (result, lines) = run(&repo, &project);

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "This package (me/my-project:1) can't be published because a package with that signature already exists."
        );
        assert_eq!(err.exit_code(), 1);
        assert!(lines.is_empty());
        assert_eq!(snapshot(repo.root()), before);
    }

    #[test]
    fn test_pack_failure_keeps_exit_code() {
        let repo = RepoFixture::new();
        let project = ProjectFixture::new(ProjectDescriptor::new("me", "my-project"));
        let (shell, _) = shell();

        let repository = repo.repository();
        let mut engine = PublishEngine::new(&repository, &FailingPacker(3), &shell);
        let err = engine.run(&options(&project)).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(err.is_reported_upstream());
        assert_eq!(engine.state(), PublishState::Packing);
        assert!(snapshot(repo.root()).is_empty());
    }

    #[test]
    fn test_invalid_version() {
        let repo = RepoFixture::new();
        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("../x"),
        )
        .with_outputs(false);

        let err = run(&repo, &project).0.unwrap_err();
        assert!(matches!(err, PublishError::InvalidVersion { ref text, .. } if text == "../x"));
        assert!(!err.is_reported_upstream());
        assert!(snapshot(repo.root()).is_empty());
    }

    #[test]
    fn test_declared_version_names_the_folder() {
        let repo = RepoFixture::new();
        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("1.0-beta"),
        )
        .with_outputs(false);

        let (result, lines) = run(&repo, &project);
        let report = result.unwrap();

        let folder = repo.root().join("me/my-project/versions/1.0-beta");
        assert_eq!(report.version_folder, folder);
        assert!(folder.join("my-project.jar").is_file());
        assert_eq!(lines, vec!["Publishing me/my-project@1.0-beta..."]);

        // The same text again is a duplicate.
        let err = run(&repo, &project).0.unwrap_err();
        assert!(matches!(err, PublishError::AlreadyExists { .. }));
    }

    #[test]
    fn test_equal_version_under_another_name_exists() {
        let repo = RepoFixture::new();
        repo.publish_nested(&sig("me", "my-project", 1), &[]);
        let before = snapshot(repo.root());

        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("1.0"),
        )
        .with_outputs(false);
        let err = run(&repo, &project).0.unwrap_err();

        assert_eq!(
            err.to_string(),
            "This package (me/my-project:1.0) can't be published because a package with that signature already exists."
        );
        assert_eq!(snapshot(repo.root()), before);
        assert!(!repo.root().join("me/my-project/versions/1.0").exists());
    }

    #[test]
    fn test_legacy_padded_folder_blocks_publish() {
        let repo = RepoFixture::new();
        repo.mkdir("me/my-project/01");
        let before = snapshot(repo.root());

        let project = ProjectFixture::new(
            ProjectDescriptor::new("me", "my-project").with_version("1"),
        )
        .with_outputs(false);
        let err = run(&repo, &project).0.unwrap_err();

        assert!(matches!(err, PublishError::AlreadyExists { ref version, .. } if version == "1"));
        assert_eq!(snapshot(repo.root()), before);
        assert!(!repo.root().join("me/my-project/versions/1").exists());
    }

    #[test]
    fn test_unpublished_dependencies() {
        let repo = RepoFixture::new();
        repo.publish_flat(&sig("me", "b", 1), &[]);
        repo.mkdir("me/c/versions/2");
        let repository = repo.repository();

        let closure = vec![sig("me", "b", 1), sig("me", "c", 2), sig("you", "d", 3)];
        assert_eq!(
            unpublished_dependencies(&repository, &closure),
            vec![&sig("you", "d", 3)]
        );
        let closure = vec![ProjectSignature::new("me", "c", VersionNumber::parse("2.0").unwrap())];
        assert!(unpublished_dependencies(&repository, &closure).is_empty());
    }

    #[test]
    fn test_cycle_leaves_repository_untouched() {
        let repo = RepoFixture::new();
        repo.publish_nested(&sig("me", "b", 1), &[sig("me", "a", 1)]);
        let before = snapshot(repo.root());

        let descriptor = with_main(descriptor_for(&sig("me", "a", 2), &[sig("me", "b", 1)]), "A", None);
        let project = ProjectFixture::new(descriptor).with_outputs(false);

        let err = run(&repo, &project).0.unwrap_err();
        assert!(matches!(err, PublishError::Resolve(ResolveError::CycleDetected { .. })));
        assert_eq!(snapshot(repo.root()), before);
    }

    #[test]
    fn test_reports_dependents() {
        let repo = RepoFixture::new();
        repo.publish_nested(&sig("me", "x", 2), &[sig("me", "my-project", 1)]);
        repo.publish_nested(&sig("me", "y", 5), &[sig("me", "other", 1)]);
        repo.publish_nested(&sig("me", "my-project", 1), &[]);

        let project =
            ProjectFixture::new(ProjectDescriptor::new("me", "my-project")).with_outputs(false);
        let (result, lines) = run(&repo, &project);

        assert_eq!(result.unwrap().dependents, vec![sig("me", "x", 2)]);
        assert_eq!(
            lines,
            vec![
                "Publishing me/my-project@2...",
                "The following projects should be updated to use me/my-project@2:",
                "  me/x@2",
            ]
        );
    }

    #[test]
    fn test_missing_artifact_writes_nothing() {
        let repo = RepoFixture::new();
        let project = ProjectFixture::new(ProjectDescriptor::new("me", "my-project"));

        let err = run(&repo, &project).0.unwrap_err();
        assert!(matches!(err, PublishError::Io(_)));
        assert!(snapshot(repo.root()).is_empty());
    }

    #[test]
    fn test_capture_vm_arguments_in_launcher() {
        let repo = RepoFixture::new();
        let descriptor = ProjectDescriptor::new("me", "tool")
            .with_version("1")
            .with_java(JavaMetadata {
                main_class: Some("Tool".into()),
                capture_vm_arguments: Some(true),
                ..JavaMetadata::default()
            });
        let project = ProjectFixture::new(descriptor).with_outputs(false);

        run(&repo, &project).0.unwrap();
        let script = std::fs::read_to_string(repo.root().join("tool.cmd")).unwrap();
        assert!(script.contains("Tool --jvm.classpath=%~dp0me/tool/versions/1/tool.jar %*"));
    }

    #[test]
    fn test_require_repository() {
        assert!(matches!(
            require_repository(None),
            Err(PublishError::MissingRepository)
        ));
        assert!(matches!(
            require_repository(Some(PathBuf::new())),
            Err(PublishError::MissingRepository)
        ));
        assert!(require_repository(Some(PathBuf::from("/tmp/qub"))).is_ok());
    }
}
