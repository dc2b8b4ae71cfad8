//! Project identification - WHO published WHAT at which version.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::version::VersionNumber;

/// Identity triple of a stored package.
///
/// Used as a dependency reference inside descriptors and as the unit
/// reported to dependents. Displayed as `publisher/project@version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectSignature {
    pub publisher: String,
    pub project: String,
    #[serde(default)]
    pub version: VersionNumber,
}

impl ProjectSignature {
    /// Create a new signature.
    pub fn new(
        publisher: impl Into<String>,
        project: impl Into<String>,
        version: VersionNumber,
    ) -> Self {
        ProjectSignature {
            publisher: publisher.into(),
            project: project.into(),
            version,
        }
    }

    /// Whether this signature names the given project, ignoring version.
    pub fn is_project(&self, publisher: &str, project: &str) -> bool {
        self.publisher == publisher && self.project == project
    }

    /// `publisher/project` without the version.
    pub fn display_project(&self) -> String {
        format!("{}/{}", self.publisher, self.project)
    }
}

impl fmt::Display for ProjectSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.publisher, self.project, self.version)
    }
}

impl FromStr for ProjectSignature {
    type Err = anyhow::Error;

    /// Parse `publisher/project` or `publisher/project@version`.
    fn from_str(s: &str) -> Result<Self> {
        let (name, version) = match s.split_once('@') {
            Some((name, version)) => {
                let version = VersionNumber::verbatim(version);
                version
                    .check_folder_name()
                    .with_context(|| format!("invalid version in `{}`", s))?;
                (name, version)
            }
            None => (s, VersionNumber::empty()),
        };

        let Some((publisher, project)) = name.split_once('/') else {
            bail!("expected `<publisher>/<project>[@<version>]`, found `{}`", s);
        };
        if publisher.is_empty() || project.is_empty() || project.contains('/') {
            bail!("expected `<publisher>/<project>[@<version>]`, found `{}`", s);
        }

        Ok(ProjectSignature::new(publisher, project, version))
    }
}
