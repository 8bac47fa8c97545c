//! Shared workspace fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use quire_registry::{InMemoryHost, Notice, NoticeLevel, SnippetService, SnippetsConfig};
use quire_types::LanguageKey;
use tempfile::TempDir;

/// A temporary workspace folder with a `.vscode/snippets` directory layout.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp workspace"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn snippets_dir(&self) -> PathBuf {
        self.root().join(".vscode").join("snippets")
    }

    pub fn snippet_path(&self, file_name: &str) -> PathBuf {
        self.snippets_dir().join(file_name)
    }

    /// Write a snippet file, creating the snippets directory if needed.
    pub fn write(&self, file_name: &str, content: &str) -> PathBuf {
        fs::create_dir_all(self.snippets_dir()).expect("create snippets dir");
        let path = self.snippet_path(file_name);
        fs::write(&path, content).expect("write snippet file");
        path
    }

    pub fn remove(&self, file_name: &str) {
        fs::remove_file(self.snippet_path(file_name)).expect("remove snippet file");
    }

    pub fn read(&self, file_name: &str) -> String {
        fs::read_to_string(self.snippet_path(file_name)).expect("read snippet file")
    }

    pub fn read_json(&self, file_name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(file_name)).expect("snippet file is JSON")
    }

    /// Start a service without example seeding.
    pub fn start(&self) -> SnippetService<InMemoryHost> {
        self.start_with(unseeded())
    }

    pub fn start_with(&self, config: SnippetsConfig) -> SnippetService<InMemoryHost> {
        SnippetService::start(config, Some(self.root()), InMemoryHost::default())
            .expect("start snippet service")
    }
}

pub fn unseeded() -> SnippetsConfig {
    SnippetsConfig {
        seed_examples: false,
        ..SnippetsConfig::default()
    }
}

pub fn key(language: &str) -> LanguageKey {
    LanguageKey::new(language).expect("valid language key")
}

pub fn errors(notices: &[Notice]) -> Vec<&Notice> {
    notices
        .iter()
        .filter(|notice| notice.level() == NoticeLevel::Error)
        .collect()
}

/// Prefixes offered for `line_prefix` in `language`, in host order.
pub fn offered(
    service: &SnippetService<InMemoryHost>,
    language: &str,
    line_prefix: &str,
) -> Vec<String> {
    service
        .host()
        .complete(&key(language), line_prefix)
        .iter()
        .map(|completion| completion.definition().prefix().to_string())
        .collect()
}
