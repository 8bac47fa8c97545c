//! Registry configuration.
//!
//! Every field has a default, so an absent `[snippets]` table behaves like
//! the stock layout (`.vscode/snippets/*.json`).
//!
//! ```toml
//! [snippets]
//! snippets_dir = ".vscode/snippets"
//! extension = "json"
//! debounce_ms = 150
//! empty_prefix = "match_nothing"
//! seed_examples = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::matcher::EmptyPrefixPolicy;

const DEFAULT_SNIPPETS_DIR: &str = ".vscode/snippets";
const DEFAULT_EXTENSION: &str = "json";
const DEFAULT_DEBOUNCE_MS: u64 = 150;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnippetsConfig {
    /// Snippets directory, relative to the workspace root.
    pub snippets_dir: PathBuf,
    /// File extension of snippet files, without the dot.
    pub extension: String,
    /// Quiet period after the last file event before rebuilding.
    pub debounce_ms: u64,
    /// Behaviour when the text before the cursor is blank.
    pub empty_prefix: EmptyPrefixPolicy,
    /// Create `all.json` and `javascript.json` examples on startup if missing.
    pub seed_examples: bool,
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            snippets_dir: PathBuf::from(DEFAULT_SNIPPETS_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            empty_prefix: EmptyPrefixPolicy::default(),
            seed_examples: true,
        }
    }
}

impl SnippetsConfig {
    /// Absolute snippets directory for a workspace root.
    #[must_use]
    pub fn snippets_dir_for(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.snippets_dir)
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
