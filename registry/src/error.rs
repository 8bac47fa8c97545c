//! Error kinds for snippet operations.
//!
//! Every error is scoped to one unit of work (one file, one workspace root).
//! None of them is process-fatal; the service turns each into a [`Notice`].
//!
//! [`Notice`]: crate::Notice

use std::io;
use std::path::{Path, PathBuf};

use quire_types::SnippetDefinitionError;
use thiserror::Error;

/// Why a snippet file failed to parse.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("expected a JSON object mapping snippet names to definitions")]
    NotAnObject,
    #[error("snippet '{name}': {source}")]
    Shape {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("snippet '{name}': {source}")]
    Invalid {
        name: String,
        #[source]
        source: SnippetDefinitionError,
    },
}

/// A snippet file that could not be parsed, with the offending path.
#[derive(Debug, Error)]
#[error("{}: {kind}", path.display())]
pub struct ParseError {
    path: PathBuf,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(path: &Path, kind: ParseErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("no workspace folder open")]
    WorkspaceUnavailable,
    #[error("failed to create snippets directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {0}")]
    FileParseFailed(#[from] ParseError),
    #[error("failed to write {}: {source}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SnippetError {
    /// Path of the file or directory the error is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::WorkspaceUnavailable => None,
            Self::DirectoryCreateFailed { path, .. }
            | Self::FileReadFailed { path, .. }
            | Self::FileWriteFailed { path, .. } => Some(path),
            Self::FileParseFailed(err) => Some(err.path()),
        }
    }
}
