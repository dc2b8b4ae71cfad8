//! Launcher script generation.
//!
//! A launcher is a two-line script at the repository root that runs a
//! package's entry point with its full classpath:
//!
//! ```text
//! @echo OFF
//! java -classpath %~dp0me/app/versions/1/app.jar;%~dp0me/lib/versions/3/lib.jar app.Main %*
//! ```
//!
//! Classpath entries are relative to the repository root and prefixed with a
//! token the shell expands to the script's own folder, so the repository can
//! move without regenerating launchers.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{ArtifactKind, ProjectSignature, Repository};
use crate::util::fs::write_string;

/// Shell dialect of generated launchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherStyle {
    /// Runtime executable
    pub runtime: String,
    /// Script file extension, without the dot
    pub extension: String,
    /// Classpath separator
    pub separator: String,
    /// Token expanding to the script's folder
    pub dir_token: String,
    /// First line of the script
    pub quiet_directive: String,
    /// Token forwarding the script's arguments
    pub args_token: String,
}

impl Default for LauncherStyle {
    fn default() -> Self {
        LauncherStyle {
            runtime: "java".to_string(),
            extension: "cmd".to_string(),
            separator: ";".to_string(),
            dir_token: "%~dp0".to_string(),
            quiet_directive: "@echo OFF".to_string(),
            args_token: "%*".to_string(),
        }
    }
}

/// A launcher ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    /// Script name without extension
    pub name: String,
    pub main_class: String,
    /// Classpath entries, repository-relative, `/`-separated
    pub classpath: Vec<String>,
    /// Forward the classpath to the program as `--jvm.classpath=`
    pub capture_vm_arguments: bool,
}

impl Launcher {
    /// Build the launcher for `package` whose transitive closure is `closure`.
    ///
    /// The package's own compiled archive comes first, then each dependency's
    /// in closure order. Dependencies use whichever layout they are stored
    /// in; an unpublished dependency points where it would be published.
    /// An unpublished dependency without a version has no such place and is
    /// left out.
    pub fn for_package(
        repo: &Repository,
        name: impl Into<String>,
        main_class: impl Into<String>,
        package: &ProjectSignature,
        closure: &[ProjectSignature],
    ) -> Self {
        let own = repo.artifact_file(
            ArtifactKind::Compiled,
            &package.publisher,
            &package.project,
            &package.version,
        );

        let mut classpath = vec![repo.relative_path(&own)];
        for dep in closure {
            let jar = match repo.find_version_folder(&dep.publisher, &dep.project, &dep.version) {
                Some(folder) => folder.artifact(ArtifactKind::Compiled, &dep.project),
                None if !dep.version.any() => {
                    tracing::warn!("{} has no version and is not published, skipping it", dep);
                    continue;
                }
                None => {
                    tracing::debug!("{} is not published, using its publish path", dep);
                    repo.artifact_file(
                        ArtifactKind::Compiled,
                        &dep.publisher,
                        &dep.project,
                        &dep.version,
                    )
                }
            };
            classpath.push(repo.relative_path(&jar));
        }

        Launcher {
            name: name.into(),
            main_class: main_class.into(),
            classpath,
            capture_vm_arguments: false,
        }
    }

    pub fn capture_vm_arguments(mut self, capture: bool) -> Self {
        self.capture_vm_arguments = capture;
        self
    }

    /// Script file name, e.g. `foo.cmd`.
    pub fn file_name(&self, style: &LauncherStyle) -> String {
        format!("{}.{}", self.name, style.extension)
    }

    /// The joined classpath with every entry anchored at the script folder.
    pub fn classpath_arg(&self, style: &LauncherStyle) -> String {
        self.classpath
            .iter()
            .map(|entry| format!("{}{}", style.dir_token, entry))
            .collect::<Vec<_>>()
            .join(&style.separator)
    }

    /// Script contents.
    pub fn render(&self, style: &LauncherStyle) -> String {
        let classpath = self.classpath_arg(style);
        let captured = if self.capture_vm_arguments {
            format!(" --jvm.classpath={}", classpath)
        } else {
            String::new()
        };

        format!(
            "{}\n{} -classpath {} {}{} {}\n",
            style.quiet_directive,
            style.runtime,
            classpath,
            self.main_class,
            captured,
            style.args_token
        )
    }

    /// Where the script lives in `repo`.
    pub fn path_in(&self, repo: &Repository, style: &LauncherStyle) -> PathBuf {
        repo.root().join(self.file_name(style))
    }
}

/// Write `launcher` at the repository root, replacing any previous script.
pub fn write_launcher(
    repo: &Repository,
    launcher: &Launcher,
    style: &LauncherStyle,
) -> Result<PathBuf> {
    let path = launcher.path_in(repo, style);
    write_script(&path, &launcher.render(style))?;
    tracing::info!("wrote launcher {}", path.display());
    Ok(path)
}

fn write_script(path: &Path, contents: &str) -> Result<()> {
    write_string(path, contents)?;

    #[cfg(unix)]
    {
        use anyhow::Context;
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .permissions();
        perms.set_mode(perms.mode() | 0o111);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to make {} executable", path.display()))?;
    }

    Ok(())
}
