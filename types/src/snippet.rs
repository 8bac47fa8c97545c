//! Snippet definitions.
//!
//! Fields are private and construction goes through [`SnippetDefinition::new`],
//! so every definition in the system satisfies the invariants: a non-empty
//! prefix without whitespace and at least one body line.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetDefinitionError {
    #[error("snippet name cannot be empty")]
    EmptyName,
    #[error("snippet prefix cannot be empty")]
    EmptyPrefix,
    #[error("snippet prefix '{0}' contains whitespace")]
    PrefixWhitespace(String),
    #[error("snippet body must contain at least one line")]
    EmptyBody,
}

/// Ordered, non-empty sequence of body lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SnippetBody(Vec<String>);

impl SnippetBody {
    pub fn new(lines: Vec<String>) -> Result<Self, SnippetDefinitionError> {
        if lines.is_empty() {
            return Err(SnippetDefinitionError::EmptyBody);
        }
        Ok(Self(lines))
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Body joined with `\n`, as it is inserted at the cursor.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.join("\n")
    }
}

/// A named snippet: trigger prefix, literal body, optional description.
///
/// Serializes to the on-disk definition shape (`prefix`, `body`,
/// `description`); the name is the key of the enclosing object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetDefinition {
    #[serde(skip)]
    name: String,
    prefix: String,
    body: SnippetBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl SnippetDefinition {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        body: Vec<String>,
        description: Option<String>,
    ) -> Result<Self, SnippetDefinitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SnippetDefinitionError::EmptyName);
        }
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(SnippetDefinitionError::EmptyPrefix);
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(SnippetDefinitionError::PrefixWhitespace(prefix));
        }
        let body = SnippetBody::new(body)?;
        Ok(Self {
            name,
            prefix,
            body,
            description,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn body(&self) -> &SnippetBody {
        &self.body
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
