//! Language keys: the identifier that selects which snippet files apply.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved key whose snippets apply to every language.
const ALL: &str = "all";

/// Identifier for a language (e.g. "python") or the reserved `all` key.
///
/// Derived from a snippet file's stem, so it must be usable as a file name:
/// non-empty, no path separators, not `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageKey(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageKeyError {
    #[error("language key cannot be empty")]
    Empty,
    #[error("language key '{0}' contains a path separator")]
    PathSeparator(String),
    #[error("language key '{0}' is not a valid file name")]
    Reserved(String),
}

impl LanguageKey {
    pub fn new(value: impl Into<String>) -> Result<Self, LanguageKeyError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LanguageKeyError::Empty);
        }
        if trimmed.contains(['/', '\\']) {
            return Err(LanguageKeyError::PathSeparator(trimmed.to_string()));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(LanguageKeyError::Reserved(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The reserved key applying to every language.
    #[must_use]
    pub fn all() -> Self {
        Self(ALL.to_string())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == ALL
    }

    /// Derive a key from a snippet file path, if its extension matches.
    ///
    /// `python.json` with extension `json` yields `python`. The extension is
    /// compared case-sensitively so two files never map to the same key.
    /// Returns `None` for other extensions and for stems that are not valid keys.
    #[must_use]
    pub fn from_file_name(path: &Path, extension: &str) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext != extension {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Self::new(stem).ok()
    }

    /// File name for this key's snippet file (e.g. `go.json`).
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageKey {
    type Error = LanguageKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LanguageKey {
    type Error = LanguageKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageKey> for String {
    fn from(value: LanguageKey) -> Self {
        value.0
    }
}
