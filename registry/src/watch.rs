//! Snippet directory change events, and the filesystem watcher that produces
//! them.
//!
//! The service only consumes [`WatchEvent`]s from a channel. [`SnippetWatcher`]
//! keeps a `notify` watcher on the snippets directory (not its subdirectories)
//! and forwards the events that concern snippet files into that channel from
//! the watcher's own thread.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use quire_types::LanguageKey;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Created,
    Changed,
    Deleted,
}

impl WatchEventKind {
    /// Kind for a `notify` event, or `None` for access and unclassified
    /// events, which never change file contents.
    #[must_use]
    pub fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Modify(_) => Some(Self::Changed),
            EventKind::Remove(_) => Some(Self::Deleted),
            EventKind::Any | EventKind::Access(_) | EventKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: PathBuf,
}

impl WatchEvent {
    #[must_use]
    pub fn new(kind: WatchEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to watch {}: {source}", path.display())]
pub struct WatchError {
    path: PathBuf,
    #[source]
    source: notify::Error,
}

impl WatchError {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Translate one `notify` event into snippet file events.
///
/// A rename carries both the old and new path; each path with the snippet
/// `extension` becomes its own event.
#[must_use]
pub fn translate(event: &Event, extension: &str) -> Vec<WatchEvent> {
    let Some(kind) = WatchEventKind::from_notify(&event.kind) else {
        return Vec::new();
    };
    event
        .paths
        .iter()
        .filter(|path| LanguageKey::from_file_name(path, extension).is_some())
        .map(|path| WatchEvent::new(kind, path))
        .collect()
}

/// Hand events to the service without blocking the watcher thread.
///
/// When the channel is full a rebuild is already pending, so the overflow
/// is dropped.
fn forward(tx: &mpsc::Sender<WatchEvent>, events: Vec<WatchEvent>) {
    for event in events {
        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::debug!(path = %event.path.display(), "Watch channel full; event dropped");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Watch receiver closed");
                return;
            }
        }
    }
}

/// Watches one snippets directory until dropped.
pub struct SnippetWatcher {
    dir: PathBuf,
    _watcher: RecommendedWatcher,
}

impl SnippetWatcher {
    /// Start watching `dir` for files with `extension`, sending events to `tx`.
    ///
    /// The directory must exist.
    pub fn new(
        dir: &Path,
        extension: &str,
        tx: mpsc::Sender<WatchEvent>,
    ) -> Result<Self, WatchError> {
        let extension = extension.to_string();
        let handler = move |result: notify::Result<Event>| match result {
            Ok(event) => forward(&tx, translate(&event, &extension)),
            Err(err) => tracing::warn!(error = %err, "File watch error"),
        };
        let to_watch_error = |source: notify::Error| WatchError {
            path: dir.to_path_buf(),
            source,
        };

        let mut watcher = notify::recommended_watcher(handler).map_err(to_watch_error)?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(to_watch_error)?;

        tracing::debug!(dir = %dir.display(), "Watching snippets directory");
        Ok(Self {
            dir: dir.to_path_buf(),
            _watcher: watcher,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
