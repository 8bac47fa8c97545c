//! User-facing notices produced by snippet operations.

use serde::Serialize;

use crate::error::SnippetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message for the host to show (information, warning, or error toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    level: NoticeLevel,
    message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&SnippetError> for Notice {
    fn from(err: &SnippetError) -> Self {
        // Directory creation failure degrades to an empty index; the rest
        // lose data or abort a command.
        match err {
            SnippetError::DirectoryCreateFailed { .. } => Self::warning(err.to_string()),
            _ => Self::error(err.to_string()),
        }
    }
}
