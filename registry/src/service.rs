//! SnippetService facade: the public API consumed by a host.
//!
//! The host interacts with the registry through this single type: it reports
//! the active language, forwards file-watch events, asks for completions
//! through its [`CompletionHost`], and runs the "add snippet" and "reload"
//! commands. Every failure is logged and queued as a [`Notice`].
//!
//! Rebuilds are serialised: watch events only mark a rebuild as pending, and
//! [`SnippetService::flush`] performs at most one rebuild once the debounce
//! window has passed. A burst of events collapses into a single rescan.

use std::io::{self, ErrorKind};
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Instant;

use quire_types::{LanguageKey, example_definition};
use quire_utils::{DirStatus, atomic_write, atomic_write_new, ensure_dir, read_or_empty};
use tokio::sync::mpsc;

use crate::config::SnippetsConfig;
use crate::error::SnippetError;
use crate::index::{RebuildReport, SnippetIndex};
use crate::lifecycle::{CompletionHost, RegistrationLifecycle};
use crate::matcher::PrefixMatcher;
use crate::notice::Notice;
use crate::store::{self, SnippetMap};
use crate::watch::{SnippetWatcher, WatchError, WatchEvent};

/// Channel capacity for watch events between the watcher task and the service.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Language whose empty snippet file is created alongside `all.json`.
const SEED_LANGUAGE: &str = "javascript";

pub struct SnippetService<H: CompletionHost> {
    config: SnippetsConfig,
    index: SnippetIndex,
    lifecycle: RegistrationLifecycle<H>,
    notices: Vec<Notice>,
    event_rx: mpsc::Receiver<WatchEvent>,
    event_tx: mpsc::Sender<WatchEvent>,
    /// Time of the most recent relevant watch event not yet rebuilt.
    pending_since: Option<Instant>,
}

impl<H: CompletionHost> SnippetService<H> {
    /// Construct the service for a workspace and load its snippets.
    ///
    /// Without a workspace root there is nowhere to keep snippets, so this
    /// fails with [`SnippetError::WorkspaceUnavailable`].
    pub fn start(
        config: SnippetsConfig,
        workspace_root: Option<&Path>,
        host: H,
    ) -> Result<Self, SnippetError> {
        let Some(root) = workspace_root else {
            tracing::warn!("No workspace folder open; snippets are unavailable");
            return Err(SnippetError::WorkspaceUnavailable);
        };

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let index = SnippetIndex::new(root, &config);
        let lifecycle = RegistrationLifecycle::new(host, PrefixMatcher::new(config.empty_prefix));
        let mut service = Self {
            config,
            index,
            lifecycle,
            notices: Vec::new(),
            event_rx,
            event_tx,
            pending_since: None,
        };

        tracing::info!(dir = %service.index.dir().display(), "Starting snippet registry");
        if service.config.seed_examples {
            service.seed_examples();
        }
        service.reload();
        Ok(service)
    }

    /// Sender for file-watch events (any watcher backend can feed it).
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<WatchEvent> {
        self.event_tx.clone()
    }

    /// Watch this service's snippets directory, feeding [`Self::event_sender`].
    ///
    /// Events arrive until the returned watcher is dropped.
    pub fn watch(&self) -> Result<SnippetWatcher, WatchError> {
        SnippetWatcher::new(self.index.dir(), self.index.extension(), self.event_sender())
    }

    #[must_use]
    pub fn config(&self) -> &SnippetsConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &SnippetIndex {
        &self.index
    }

    #[must_use]
    pub fn lifecycle(&self) -> &RegistrationLifecycle<H> {
        &self.lifecycle
    }

    #[must_use]
    pub fn host(&self) -> &H {
        self.lifecycle.host()
    }

    /// Effective snippets for `language` as of the latest rebuild.
    #[must_use]
    pub fn effective_snippets(&self, language: &LanguageKey) -> SnippetMap {
        self.index.effective_snippets(language)
    }

    /// The active editor switched to a file of `language`.
    pub fn on_context_change(&mut self, language: LanguageKey) {
        self.lifecycle.on_context_change(language, &self.index);
    }

    /// Drain pending watch events, up to `budget`.
    ///
    /// Non-blocking. Events for files outside the snippets directory or with
    /// another extension are ignored; the rest mark a rebuild as pending.
    pub fn poll_events(&mut self, budget: usize) -> usize {
        let mut count = 0;
        while count < budget {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(&event);
                    count += 1;
                }
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
        count
    }

    fn handle_event(&mut self, event: &WatchEvent) {
        let in_dir = event.path.parent() == Some(self.index.dir());
        if !in_dir || LanguageKey::from_file_name(&event.path, self.index.extension()).is_none() {
            return;
        }
        tracing::debug!(kind = ?event.kind, path = %event.path.display(), "Snippet file event");
        self.pending_since = Some(Instant::now());
    }

    /// Whether watch events are waiting for a rebuild.
    #[must_use]
    pub fn has_pending_rebuild(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Rebuild if events are pending and the debounce window has elapsed
    /// since the last one. Returns whether a rebuild ran.
    pub fn flush(&mut self, now: Instant) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        if now.saturating_duration_since(since) < self.config.debounce() {
            return false;
        }
        self.reload();
        true
    }

    /// Rebuild immediately and refresh every registration, bypassing debounce.
    pub fn reload(&mut self) {
        self.pending_since = None;
        let report = self.index.rebuild();
        self.report_rebuild(report);
        self.lifecycle.on_index_rebuilt(&self.index);
    }

    fn report_rebuild(&mut self, report: RebuildReport) {
        if let Some(dir) = &report.created_dir {
            self.notices.push(Notice::info(format!(
                "Created snippets directory: {}",
                dir.display()
            )));
        }
        for failure in &report.failures {
            self.notices.push(Notice::from(failure));
        }
        tracing::info!(
            loaded = report.loaded.len(),
            removed = report.removed.len(),
            failures = report.failures.len(),
            "Snippet index rebuilt"
        );
    }

    fn fail(&mut self, err: SnippetError) -> SnippetError {
        tracing::warn!("{err}");
        self.notices.push(Notice::from(&err));
        err
    }

    fn ensure_snippets_dir(&mut self) -> Result<(), SnippetError> {
        match ensure_dir(self.index.dir()) {
            Ok(DirStatus::Created) => {
                self.notices.push(Notice::info(format!(
                    "Created snippets directory: {}",
                    self.index.dir().display()
                )));
                Ok(())
            }
            Ok(DirStatus::Existing) => Ok(()),
            Err(source) => Err(self.fail(SnippetError::DirectoryCreateFailed {
                path: self.index.dir().to_path_buf(),
                source,
            })),
        }
    }

    /// Write the example `Test` snippet into `language`'s file.
    ///
    /// Creates the directory and file as needed. Existing entries are kept;
    /// an existing `Test` entry is replaced. If the current file content does
    /// not parse, nothing is written. The write is atomic.
    pub fn add_snippet(&mut self, language: &LanguageKey) -> Result<PathBuf, SnippetError> {
        self.ensure_snippets_dir()?;
        let path = self.index.file_path(language);

        let raw = match read_or_empty(&path) {
            Ok(raw) => raw,
            Err(source) => return Err(self.fail(SnippetError::FileReadFailed { path, source })),
        };
        let mut snippets = match store::parse(&path, &raw) {
            Ok(snippets) => snippets,
            Err(err) => return Err(self.fail(SnippetError::FileParseFailed(err))),
        };

        let example = example_definition(language);
        snippets.insert(example.name().to_string(), example);

        let written = store::render(&snippets)
            .map_err(io::Error::other)
            .and_then(|rendered| atomic_write(&path, rendered.as_bytes()));
        if let Err(source) = written {
            return Err(self.fail(SnippetError::FileWriteFailed { path, source }));
        }

        tracing::info!(language = %language, path = %path.display(), "Snippet added");
        self.notices.push(Notice::info(format!(
            "Snippet added to {}",
            language.file_name(self.index.extension())
        )));
        self.reload();
        Ok(path)
    }

    /// Create the example files (`all.json` with the `Test` snippet and an
    /// empty `javascript.json`) when they do not exist yet.
    ///
    /// Existing files are never touched. Returns the files created.
    pub fn seed_examples(&mut self) -> Vec<PathBuf> {
        if self.ensure_snippets_dir().is_err() {
            return Vec::new();
        }

        let all = LanguageKey::all();
        let mut example = SnippetMap::new();
        let definition = example_definition(&all);
        example.insert(definition.name().to_string(), definition);

        let mut seeds = Vec::new();
        match store::render(&example) {
            Ok(content) => seeds.push((all, content)),
            Err(e) => {
                let path = self.index.file_path(&all);
                self.fail(SnippetError::FileWriteFailed {
                    path,
                    source: io::Error::other(e),
                });
            }
        }
        if let Ok(language) = LanguageKey::new(SEED_LANGUAGE) {
            seeds.push((language, String::new()));
        }

        let mut created = Vec::new();
        for (language, content) in seeds {
            let path = self.index.file_path(&language);
            match atomic_write_new(&path, content.as_bytes()) {
                Ok(()) => {
                    let name = language.file_name(self.index.extension());
                    if content.is_empty() {
                        self.notices
                            .push(Notice::info(format!("Created empty {name} snippet file")));
                    } else {
                        self.notices
                            .push(Notice::info(format!("Created example {name} snippet file")));
                    }
                    created.push(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "Example snippet file already exists");
                }
                Err(source) => {
                    self.fail(SnippetError::FileWriteFailed { path, source });
                }
            }
        }
        created
    }

    /// Take queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }

    /// Retire every completion source registered with the host.
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down snippet registry");
        self.lifecycle.shutdown();
    }
}
