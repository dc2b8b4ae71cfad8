//! Boundary to the external build-and-pack pipeline.
//!
//! The pipeline compiles the project, runs its tests and leaves archives in
//! the project's `outputs/` folder. Publishing only ever sees the result:
//! either the pipeline failed with an exit code, or it produced artifacts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::{ArtifactKind, ProjectDescriptor};
use crate::util::process::ProcessBuilder;

/// Folder of a project the pipeline writes its archives into.
pub const OUTPUTS_DIR: &str = "outputs";

/// Archives produced by a successful pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackArtifacts {
    pub compiled: PathBuf,
    pub sources: PathBuf,
    pub tests: Option<PathBuf>,
}

impl PackArtifacts {
    /// Locate the archives of `project` in `<project_root>/outputs/`.
    ///
    /// The compiled and sources archives are required.
    pub fn locate(project_root: &Path, project: &str) -> Result<Self> {
        let outputs = project_root.join(OUTPUTS_DIR);
        let path = |kind: ArtifactKind| outputs.join(kind.file_name(project));

        let compiled = path(ArtifactKind::Compiled);
        let sources = path(ArtifactKind::Sources);
        for required in [&compiled, &sources] {
            if !required.is_file() {
                bail!("missing pack output {}", required.display());
            }
        }

        let tests = Some(path(ArtifactKind::Tests)).filter(|p| p.is_file());

        Ok(PackArtifacts {
            compiled,
            sources,
            tests,
        })
    }

    /// The archive of a kind, if present.
    pub fn get(&self, kind: ArtifactKind) -> Option<&Path> {
        match kind {
            ArtifactKind::Compiled => Some(&self.compiled),
            ArtifactKind::Sources => Some(&self.sources),
            ArtifactKind::Tests => self.tests.as_deref(),
        }
    }

    /// Present archives, in copy order.
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &Path)> + '_ {
        ArtifactKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|path| (kind, path)))
    }
}

/// What the pipeline handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// Build and tests passed; archives are ready.
    Packed(PackArtifacts),
    /// The pipeline failed with this exit code.
    Failed { exit_code: i32 },
}

/// Something that turns a project folder into publishable archives.
pub trait Packer {
    /// Human-readable description for status output.
    fn describe(&self) -> String;

    /// Run the pipeline for the project at `project_root`.
    fn pack(&self, project_root: &Path, descriptor: &ProjectDescriptor) -> Result<PackOutcome>;
}

/// Runs an external pack command in the project folder.
#[derive(Debug, Clone)]
pub struct CommandPacker {
    command: ProcessBuilder,
}

impl CommandPacker {
    pub fn new(command: ProcessBuilder) -> Self {
        CommandPacker { command }
    }

    /// Build from a whitespace-separated command line.
    pub fn from_command_line(line: &str) -> Result<Self> {
        Ok(CommandPacker::new(ProcessBuilder::from_command_line(line)?))
    }
}

impl Packer for CommandPacker {
    fn describe(&self) -> String {
        format!("`{}`", self.command.display_command())
    }

    fn pack(&self, project_root: &Path, descriptor: &ProjectDescriptor) -> Result<PackOutcome> {
        tracing::info!(
            "running `{}` in {}",
            self.command.display_command(),
            project_root.display()
        );

        let status = self.command.clone().cwd(project_root).status()?;
        if !status.success() {
            // A signal-terminated pipeline has no code of its own.
            let exit_code = status.code().unwrap_or(1);
            tracing::debug!("pack command failed with {}", exit_code);
            return Ok(PackOutcome::Failed { exit_code });
        }

        PackArtifacts::locate(project_root, &descriptor.project).map(PackOutcome::Packed)
    }
}

/// Trusts archives already present in `outputs/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrebuiltPacker;

impl Packer for PrebuiltPacker {
    fn describe(&self) -> String {
        "existing outputs".to_string()
    }

    fn pack(&self, project_root: &Path, descriptor: &ProjectDescriptor) -> Result<PackOutcome> {
        PackArtifacts::locate(project_root, &descriptor.project).map(PackOutcome::Packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ProjectFixture;

    fn project(tests: bool) -> ProjectFixture {
        ProjectFixture::new(ProjectDescriptor::new("me", "my-project")).with_outputs(tests)
    }

    #[test]
    fn test_locate_without_tests() {
        let fixture = project(false);
        let artifacts = PackArtifacts::locate(fixture.root(), "my-project").unwrap();

        assert_eq!(artifacts.compiled, fixture.outputs().join("my-project.jar"));
        assert_eq!(artifacts.sources, fixture.outputs().join("my-project.sources.jar"));
        assert_eq!(artifacts.tests, None);
        assert_eq!(artifacts.iter().count(), 2);
    }

    #[test]
    fn test_locate_with_tests() {
        let fixture = project(true);
        let artifacts = PackArtifacts::locate(fixture.root(), "my-project").unwrap();

        let kinds: Vec<_> = artifacts.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, ArtifactKind::ALL.to_vec());
    }

    #[test]
    fn test_locate_missing_sources() {
        let fixture = project(false);
        std::fs::remove_file(fixture.outputs().join("my-project.sources.jar")).unwrap();

        let err = PackArtifacts::locate(fixture.root(), "my-project").unwrap_err();
        assert!(err.to_string().contains("my-project.sources.jar"));
    }

    #[test]
    fn test_prebuilt_packer() {
        let fixture = project(false);
        let outcome = PrebuiltPacker
            .pack(fixture.root(), &fixture.descriptor)
            .unwrap();
        assert!(matches!(outcome, PackOutcome::Packed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_packer_failure_code() {
        let fixture = project(false);
        let packer = CommandPacker::new(ProcessBuilder::new("sh").args(["-c", "exit 4"]));

        let outcome = packer.pack(fixture.root(), &fixture.descriptor).unwrap();
        assert_eq!(outcome, PackOutcome::Failed { exit_code: 4 });
    }

    #[cfg(unix)]
    #[test]
    fn test_command_packer_runs_in_project_folder() {
        let fixture = ProjectFixture::new(ProjectDescriptor::new("me", "app"));
        let script = "mkdir -p outputs && touch outputs/app.jar outputs/app.sources.jar";
        let packer = CommandPacker::new(ProcessBuilder::new("sh").args(["-c", script]));

        let outcome = packer.pack(fixture.root(), &fixture.descriptor).unwrap();
        let PackOutcome::Packed(artifacts) = outcome else {
            panic!("expected artifacts");
        };
        assert!(artifacts.compiled.is_file());
    }
}
