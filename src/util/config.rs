//! Configuration file support for qub.
//!
//! qub reads two configuration file locations:
//! - Global: `~/.qub/config.toml` - User-wide defaults
//! - Project: `<project>/.qub/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Every setting is
//! optional; accessors fall back to built-in defaults.
//!
//! ```toml
//! [repository]
//! root = "/home/me/qub"
//!
//! [publish]
//! pack-command = "qub-pack"
//! show-duration = true
//!
//! [launcher]
//! runtime = "java"
//! extension = "cmd"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ops::launcher::LauncherStyle;

/// Default external pack pipeline command.
pub const DEFAULT_PACK_COMMAND: &str = "qub-pack";

/// qub configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository settings
    pub repository: RepositoryConfig,

    /// Publish settings
    pub publish: PublishConfig,

    /// Launcher script settings
    pub launcher: LauncherConfig,
}

/// Repository-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root, used when neither `--repository` nor QUB_HOME is set
    pub root: Option<PathBuf>,
}

/// Publish-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PublishConfig {
    /// Command that builds, tests and packs the project
    pub pack_command: Option<String>,

    /// Print the total publish duration
    pub show_duration: Option<bool>,
}

/// Launcher script configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LauncherConfig {
    /// Runtime executable invoked by the launcher
    pub runtime: Option<String>,

    /// Launcher file extension, without the dot
    pub extension: Option<String>,

    /// Classpath entry separator
    pub separator: Option<String>,

    /// Token the shell expands to the launcher's own directory
    pub dir_token: Option<String>,

    /// First line of the launcher
    pub quiet_directive: Option<String>,

    /// Token forwarding the launcher's arguments
    pub args_token: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.repository.root.is_some() {
            self.repository.root = other.repository.root;
        }

        if other.publish.pack_command.is_some() {
            self.publish.pack_command = other.publish.pack_command;
        }
        if other.publish.show_duration.is_some() {
            self.publish.show_duration = other.publish.show_duration;
        }

        let launcher = other.launcher;
        if launcher.runtime.is_some() {
            self.launcher.runtime = launcher.runtime;
        }
        if launcher.extension.is_some() {
            self.launcher.extension = launcher.extension;
        }
        if launcher.separator.is_some() {
            self.launcher.separator = launcher.separator;
        }
        if launcher.dir_token.is_some() {
            self.launcher.dir_token = launcher.dir_token;
        }
        if launcher.quiet_directive.is_some() {
            self.launcher.quiet_directive = launcher.quiet_directive;
        }
        if launcher.args_token.is_some() {
            self.launcher.args_token = launcher.args_token;
        }
    }

    /// The pack command line.
    pub fn pack_command(&self) -> &str {
        self.publish
            .pack_command
            .as_deref()
            .unwrap_or(DEFAULT_PACK_COMMAND)
    }

    /// Whether to print the total publish duration.
    pub fn show_duration(&self) -> bool {
        self.publish.show_duration.unwrap_or(true)
    }

    /// Launcher style with defaults filled in.
    pub fn launcher_style(&self) -> LauncherStyle {
        let defaults = LauncherStyle::default();
        let launcher = &self.launcher;
        LauncherStyle {
            runtime: launcher.runtime.clone().unwrap_or(defaults.runtime),
            extension: launcher.extension.clone().unwrap_or(defaults.extension),
            separator: launcher.separator.clone().unwrap_or(defaults.separator),
            dir_token: launcher.dir_token.clone().unwrap_or(defaults.dir_token),
            quiet_directive: launcher
                .quiet_directive
                .clone()
                .unwrap_or(defaults.quiet_directive),
            args_token: launcher.args_token.clone().unwrap_or(defaults.args_token),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.qub/config.toml)
/// 2. Global config (~/.qub/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global qub config directory (~/.qub).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".qub"))
}

/// Get the project config path (<project>/.qub/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".qub").join("config.toml")
}
