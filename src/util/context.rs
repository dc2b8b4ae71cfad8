//! Global context for qub operations.
//!
//! Provides centralized access to configuration paths and the environment.
//! The context is passed explicitly; nothing here is process-global.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global qub settings (~/.qub/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".qub"));

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Override the qub home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Resolve a folder argument against the working directory.
    pub fn resolve_folder(&self, folder: Option<&Path>) -> PathBuf {
        match folder {
            Some(folder) if folder.is_absolute() => folder.to_path_buf(),
            Some(folder) => self.cwd.join(folder),
            None => self.cwd.clone(),
        }
    }

    /// Load merged global and project configuration for a project folder.
    pub fn load_config(&self, project_root: &Path) -> Config {
        load_config(&self.config_path(), &project_config_path(project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));

        assert_eq!(ctx.cwd(), tmp.path());
        assert_eq!(ctx.config_path(), tmp.path().join("home/config.toml"));
        assert_eq!(ctx.resolve_folder(None), tmp.path());
        assert_eq!(
            ctx.resolve_folder(Some(Path::new("proj"))),
            tmp.path().join("proj")
        );
    }

    #[test]
    fn test_project_config_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let project = tmp.path().join("proj");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(project.join(".qub")).unwrap();
        std::fs::write(home.join("config.toml"), "[publish]\npack-command = \"global\"\n").unwrap();
        std::fs::write(
            project.join(".qub/config.toml"),
            "[publish]\npack-command = \"local\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(home);

        assert_eq!(ctx.load_config(&project).pack_command(), "local");
    }
}
