//! `project.json` descriptor parsing and schema.
//!
//! The descriptor sits at the root of a project being published and is
//! copied verbatim into every version folder. Only `publisher` and
//! `project` are required:
//!
//! ```json
//! {
//!   "publisher": "me",
//!   "project": "my-project",
//!   "version": "1",
//!   "java": {
//!     "mainClass": "MyProject",
//!     "shortcutName": "foo",
//!     "dependencies": [
//!       { "publisher": "you", "project": "stuff", "version": "7.3.1" }
//!     ]
//!   }
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::signature::ProjectSignature;
use crate::core::version::VersionNumber;

/// Descriptor file name, both in project roots and version folders.
pub const DESCRIPTOR_NAME: &str = "project.json";

/// Parsed package metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub publisher: String,

    pub project: String,

    /// Declared version text. Absent or empty means "assign automatically".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Runtime metadata (entry point, shortcut, dependencies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java: Option<JavaMetadata>,
}

/// The optional nested runtime object of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaMetadata {
    /// Fully-qualified entry-point class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,

    /// Launcher name; defaults to the project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_name: Option<String>,

    /// Ordered direct dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<ProjectSignature>>,

    /// Forward the computed classpath to the program as `--jvm.classpath=`
    #[serde(
        default,
        rename = "captureVMArguments",
        skip_serializing_if = "Option::is_none"
    )]
    pub capture_vm_arguments: Option<bool>,
}

impl ProjectDescriptor {
    /// Create a descriptor with no version and no runtime metadata.
    pub fn new(publisher: impl Into<String>, project: impl Into<String>) -> Self {
        ProjectDescriptor {
            publisher: publisher.into(),
            project: project.into(),
            version: None,
            java: None,
        }
    }

    /// Set the declared version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the runtime metadata.
    pub fn with_java(mut self, java: JavaMetadata) -> Self {
        self.java = Some(java);
        self
    }

    /// Parse descriptor text.
    pub fn parse(text: &str) -> Result<Self> {
        let descriptor: ProjectDescriptor =
            serde_json::from_str(text).context("failed to parse project.json")?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid descriptor {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.publisher.trim().is_empty() {
            anyhow::bail!("`publisher` must not be empty");
        }
        if self.project.trim().is_empty() {
            anyhow::bail!("`project` must not be empty");
        }
        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize project.json")
    }

    /// The declared version, taken as written.
    ///
    /// An absent or blank version is `None`.
    pub fn declared_version(&self) -> Option<VersionNumber> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(VersionNumber::verbatim)
    }

    /// Entry-point class, when a launcher should be generated.
    pub fn main_class(&self) -> Option<&str> {
        self.java
            .as_ref()
            .and_then(|j| j.main_class.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    /// Launcher name: the shortcut name, or the project name when unset.
    pub fn shortcut_name(&self) -> &str {
        self.java
            .as_ref()
            .and_then(|j| j.shortcut_name.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.project)
    }

    /// Ordered direct dependencies (empty when none are declared).
    pub fn dependencies(&self) -> &[ProjectSignature] {
        self.java
            .as_ref()
            .and_then(|j| j.dependencies.as_deref())
            .unwrap_or(&[])
    }

    /// Whether the launcher should forward its classpath to the program.
    pub fn capture_vm_arguments(&self) -> bool {
        self.java
            .as_ref()
            .and_then(|j| j.capture_vm_arguments)
            .unwrap_or(false)
    }

    /// Whether any direct dependency names the given project.
    pub fn depends_on(&self, publisher: &str, project: &str) -> bool {
        self.dependencies()
            .iter()
            .any(|d| d.is_project(publisher, project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let d = ProjectDescriptor::parse(r#"{"publisher":"me","project":"my-project"}"#).unwrap();
        assert_eq!(d.publisher, "me");
        assert_eq!(d.declared_version(), None);
        assert_eq!(d.main_class(), None);
        assert_eq!(d.shortcut_name(), "my-project");
        assert!(d.dependencies().is_empty());
    }

    #[test]
    fn test_parse_full() {
        let d = ProjectDescriptor::parse(
            r#"{
                "publisher": "me",
                "project": "my-project",
                "version": "2",
                "java": {
                    "mainClass": "MyProject",
                    "shortcutName": "foo",
                    "captureVMArguments": true,
                    "dependencies": [
                        { "publisher": "you", "project": "stuff", "version": "7.3.1" },
                        { "publisher": "me", "project": "my-other-project", "version": "5" }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(d.declared_version(), Some(VersionNumber::major(2)));
        assert_eq!(d.main_class(), Some("MyProject"));
        assert_eq!(d.shortcut_name(), "foo");
        assert!(d.capture_vm_arguments());
        assert_eq!(d.dependencies().len(), 2);
        assert!(d.depends_on("you", "stuff"));
        assert!(!d.depends_on("you", "other"));
    }

    #[test]
    fn test_blank_version_is_unset() {
        let d = ProjectDescriptor::new("me", "a").with_version("  ");
        assert_eq!(d.declared_version(), None);
    }

    #[test]
    fn test_non_numeric_version_is_kept() {
        let d = ProjectDescriptor::new("me", "a").with_version(" 1.0-beta ");
        let version = d.declared_version().unwrap();
        assert!(!version.is_numeric());
        assert_eq!(version.to_string(), "1.0-beta");
    }

    #[test]
    fn test_malformed_descriptor() {
        assert!(ProjectDescriptor::parse("{").is_err());
        assert!(ProjectDescriptor::parse(r#"{"publisher":"me"}"#).is_err());
        assert!(ProjectDescriptor::parse(r#"{"publisher":"","project":"a"}"#).is_err());
    }

    #[test]
    fn test_dependency_versions_are_verbatim() {
        let d = ProjectDescriptor::parse(
            r#"{"publisher":"me","project":"a","java":{"dependencies":[{"publisher":"x","project":"y","version":"2.0-rc1"}]}}"#,
        )
        .unwrap();
        assert_eq!(d.dependencies()[0].version.to_string(), "2.0-rc1");
    }

    #[test]
    fn test_json_roundtrip_omits_unset_fields() {
        let d = ProjectDescriptor::new("me", "a").with_java(JavaMetadata::default());
        let json = d.to_json_pretty().unwrap();
        assert!(!json.contains("version"));
        assert!(!json.contains("mainClass"));
        assert_eq!(ProjectDescriptor::parse(&json).unwrap(), d);
    }
}
