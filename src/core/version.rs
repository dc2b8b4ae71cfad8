//! Dotted version numbers for published projects.
//!
//! A `VersionNumber` is a sequence of non-negative integer components such as
//! `7.3.1`. Versions may be partially specified (`1`, `1.2`) or empty (no
//! version declared). Comparison is numeric per component, and a missing
//! trailing component compares as `0`, so `1 == 1.0` and `1.2 < 1.10`.
//!
//! A version keeps the text it was written with: `01` stays `01` and names
//! the folder `01`. Declared versions that aren't dotted integers
//! (`1.0-beta`) are kept verbatim as opaque versions; they sort after every
//! numeric version and are equal only to the same text.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a version string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("empty component in version `{text}`")]
    EmptyComponent { text: String },

    #[error("invalid component `{component}` in version `{text}`")]
    InvalidComponent { text: String, component: String },

    #[error("version `{text}` can't be used as a folder name")]
    NotAFolderName { text: String },
}

/// A comparable, possibly partial, dotted version identifier.
#[derive(Clone)]
pub struct VersionNumber {
    /// Text as written
    text: String,
    /// Numeric components, `None` for an opaque version
    components: Option<Vec<u64>>,
}

impl Default for VersionNumber {
    fn default() -> Self {
        VersionNumber::empty()
    }
}

impl VersionNumber {
    /// The empty version ("no version declared").
    pub fn empty() -> Self {
        VersionNumber {
            text: String::new(),
            components: Some(Vec::new()),
        }
    }

    /// Create a single-component version.
    pub fn major(major: u64) -> Self {
        VersionNumber {
            text: major.to_string(),
            components: Some(vec![major]),
        }
    }

    /// Parse a dotted version. The empty string parses to the empty version.
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(VersionNumber::empty());
        }

        let mut components = Vec::new();
        for segment in trimmed.split('.') {
            if segment.is_empty() {
                return Err(VersionParseError::EmptyComponent {
                    text: text.to_string(),
                });
            }
            // `u64::from_str` accepts a leading `+`; versions don't.
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionParseError::InvalidComponent {
                    text: text.to_string(),
                    component: segment.to_string(),
                });
            }
            let value = segment
                .parse::<u64>()
                .map_err(|_| VersionParseError::InvalidComponent {
                    text: text.to_string(),
                    component: segment.to_string(),
                })?;
            components.push(value);
        }

        Ok(VersionNumber {
            text: trimmed.to_string(),
            components: Some(components),
        })
    }

    /// Take a declared version as written.
    ///
    /// Dotted integers parse as usual; anything else becomes an opaque
    /// version holding the trimmed text. Never fails.
    pub fn verbatim(text: &str) -> Self {
        VersionNumber::parse(text).unwrap_or_else(|_| VersionNumber {
            text: text.trim().to_string(),
            components: None,
        })
    }

    /// Whether this version is a dotted integer sequence.
    pub fn is_numeric(&self) -> bool {
        self.components.is_some()
    }

    /// The numeric components; empty for an opaque version.
    pub fn components(&self) -> &[u64] {
        self.components.as_deref().unwrap_or(&[])
    }

    /// Whether component 0 is present.
    pub fn has_major(&self) -> bool {
        !self.components().is_empty()
    }

    /// Whether a version was given at all.
    pub fn any(&self) -> bool {
        !self.text.is_empty()
    }

    /// Component 0, if present.
    pub fn major_component(&self) -> Option<u64> {
        self.components().first().copied()
    }

    /// Increment component 0 and drop every other component.
    ///
    /// Returns `None` when there is no major component or it would overflow.
    pub fn increment_major(&self) -> Option<VersionNumber> {
        let major = self.major_component()?.checked_add(1)?;
        Some(VersionNumber::major(major))
    }

    /// Check the version can name a single folder in the repository.
    pub fn check_folder_name(&self) -> Result<(), VersionParseError> {
        let text = self.text.as_str();
        let unusable = text.is_empty()
            || text.starts_with('.')
            || text.contains(['/', '\\'])
            || text.chars().any(char::is_control);
        if unusable {
            return Err(VersionParseError::NotAFolderName {
                text: text.to_string(),
            });
        }
        Ok(())
    }

    /// Components with trailing zeros removed.
    fn significant(&self) -> Option<&[u64]> {
        let components = self.components.as_deref()?;
        let len = components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        Some(&components[..len])
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl Hash for VersionNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.significant() {
            Some(significant) => significant.hash(state),
            None => self.text.hash(state),
        }
        self.is_numeric().hash(state);
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = match (&self.components, &other.components) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => return self.text.cmp(&other.text),
        };

        let len = lhs.len().max(rhs.len());
        for i in 0..len {
            let l = lhs.get(i).copied().unwrap_or(0);
            let r = rhs.get(i).copied().unwrap_or(0);
            match l.cmp(&r) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionNumber({})", self)
    }
}

impl FromStr for VersionNumber {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionNumber::parse(s)
    }
}

impl Serialize for VersionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    /// Stored descriptors may reference any version text.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(VersionNumber::verbatim(&text))
    }
}
