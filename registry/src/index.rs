//! Snippet index: every loaded snippet file of one workspace, by language.
//!
//! The index is rebuilt wholesale from a directory scan. Each file is parsed
//! independently: a file that fails to read or parse keeps its previous
//! entry, and the failure is reported without affecting the other files.

use std::fs;
use std::io::{self, ErrorKind};
use std::mem;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use quire_types::LanguageKey;
use quire_utils::{DirStatus, ensure_dir};

use crate::config::SnippetsConfig;
use crate::error::SnippetError;
use crate::store::{self, SnippetMap};

/// One loaded snippet file.
#[derive(Debug, Clone)]
pub struct SnippetFile {
    language: LanguageKey,
    path: PathBuf,
    snippets: SnippetMap,
}

impl SnippetFile {
    #[must_use]
    pub fn language(&self) -> &LanguageKey {
        &self.language
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn snippets(&self) -> &SnippetMap {
        &self.snippets
    }
}

/// What a rebuild did, for reporting.
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Set when the snippets directory did not exist and was created.
    pub created_dir: Option<PathBuf>,
    /// Languages loaded after the rebuild (including retained ones).
    pub loaded: Vec<LanguageKey>,
    /// Languages whose files disappeared.
    pub removed: Vec<LanguageKey>,
    /// Per-file (or per-directory) failures.
    pub failures: Vec<SnippetError>,
}

pub struct SnippetIndex {
    dir: PathBuf,
    extension: String,
    files: IndexMap<LanguageKey, SnippetFile>,
}

impl SnippetIndex {
    #[must_use]
    pub fn new(workspace_root: &Path, config: &SnippetsConfig) -> Self {
        Self {
            dir: config.snippets_dir_for(workspace_root),
            extension: config.extension.clone(),
            files: IndexMap::new(),
        }
    }

    /// The snippets directory this index scans.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the snippet file for `language`, whether or not it exists.
    #[must_use]
    pub fn file_path(&self, language: &LanguageKey) -> PathBuf {
        self.dir.join(language.file_name(&self.extension))
    }

    /// Rescan the snippets directory and reload every snippet file.
    pub fn rebuild(&mut self) -> RebuildReport {
        let mut report = RebuildReport::default();

        match ensure_dir(&self.dir) {
            Ok(DirStatus::Created) => {
                tracing::info!(dir = %self.dir.display(), "Created snippets directory");
                report.created_dir = Some(self.dir.clone());
            }
            Ok(DirStatus::Existing) => {}
            Err(source) => {
                tracing::warn!(dir = %self.dir.display(), "Failed to create snippets directory: {source}");
                report.removed = self.clear();
                report.failures.push(SnippetError::DirectoryCreateFailed {
                    path: self.dir.clone(),
                    source,
                });
                return report;
            }
        }

        let candidates = match self.scan(&mut report) {
            Ok(candidates) => candidates,
            Err(source) => {
                tracing::warn!(dir = %self.dir.display(), "Failed to list snippets directory: {source}");
                report.loaded = self.files.keys().cloned().collect();
                report.failures.push(SnippetError::FileReadFailed {
                    path: self.dir.clone(),
                    source,
                });
                return report;
            }
        };
        // An unreadable entry may hide a file that still exists.
        let scan_complete = report.failures.is_empty();

        let mut previous = mem::take(&mut self.files);
        for (language, path) in candidates {
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                // Deleted between the scan and the read.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    tracing::warn!(path = %path.display(), "Failed to read snippet file: {source}");
                    self.retain_previous(&mut previous, &language);
                    report
                        .failures
                        .push(SnippetError::FileReadFailed { path, source });
                    continue;
                }
            };

            match store::parse(&path, &raw) {
                Ok(snippets) => {
                    tracing::debug!(
                        language = %language,
                        count = snippets.len(),
                        "Loaded snippet file"
                    );
                    previous.shift_remove(&language);
                    self.files.insert(
                        language.clone(),
                        SnippetFile {
                            language,
                            path,
                            snippets,
                        },
                    );
                }
                Err(err) => {
                    tracing::warn!("Failed to parse snippet file: {err}");
                    self.retain_previous(&mut previous, &language);
                    report.failures.push(SnippetError::FileParseFailed(err));
                }
            }
        }

        if scan_complete {
            report.removed = previous.into_keys().collect();
        } else {
            self.files.extend(previous);
        }
        report.loaded = self.files.keys().cloned().collect();
        for language in &report.removed {
            tracing::info!(language = %language, "Snippet file removed");
        }
        report
    }

    /// Snippet files in the directory, sorted by file name.
    ///
    /// Fails only if the directory cannot be listed; an entry that cannot be
    /// read is skipped and reported.
    fn scan(&self, report: &mut RebuildReport) -> io::Result<Vec<(LanguageKey, PathBuf)>> {
        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    tracing::warn!(dir = %self.dir.display(), "Failed to read directory entry: {source}");
                    report.failures.push(SnippetError::FileReadFailed {
                        path: self.dir.clone(),
                        source,
                    });
                    continue;
                }
            };
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            let path = entry.path();
            if let Some(language) = LanguageKey::from_file_name(&path, &self.extension) {
                candidates.push((language, path));
            }
        }
        candidates.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(candidates)
    }

    fn retain_previous(
        &mut self,
        previous: &mut IndexMap<LanguageKey, SnippetFile>,
        language: &LanguageKey,
    ) {
        if let Some(file) = previous.shift_remove(language) {
            self.files.insert(language.clone(), file);
        }
    }

    fn clear(&mut self) -> Vec<LanguageKey> {
        mem::take(&mut self.files).into_keys().collect()
    }

    /// Snippets that apply to `language`: the `all` file overlaid with the
    /// language's own file. On a name collision the language file wins.
    ///
    /// Pure read; reflects the most recent rebuild.
    #[must_use]
    pub fn effective_snippets(&self, language: &LanguageKey) -> SnippetMap {
        let mut effective = self
            .files
            .get(&LanguageKey::all())
            .map(|file| file.snippets.clone())
            .unwrap_or_default();

        if !language.is_all()
            && let Some(file) = self.files.get(language)
        {
            for (name, definition) in &file.snippets {
                effective.insert(name.clone(), definition.clone());
            }
        }
        effective
    }

    /// Languages with a loaded snippet file, in scan order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageKey> {
        self.files.keys()
    }

    /// Loaded snippet files, in scan order.
    pub fn files(&self) -> impl Iterator<Item = &SnippetFile> {
        self.files.values()
    }

    #[must_use]
    pub fn file(&self, language: &LanguageKey) -> Option<&SnippetFile> {
        self.files.get(language)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
