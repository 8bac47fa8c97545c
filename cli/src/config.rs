//! User configuration at `~/.quire/config.toml`.
//!
//! ```toml
//! [snippets]
//! snippets_dir = ".vscode/snippets"
//! debounce_ms = 150
//! empty_prefix = "match_nothing"
//! ```

use std::path::{Path, PathBuf};

use quire_registry::SnippetsConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct QuireConfig {
    pub snippets: Option<SnippetsConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl QuireConfig {
    /// Load the config from `path`, or from the default location.
    ///
    /// A missing file is not an error: it yields `Ok(None)`.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(config_path) {
            Some(path) => path,
            None => return Ok(None),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    /// Snippet settings, with defaults for anything unset.
    #[must_use]
    pub fn snippets(&self) -> SnippetsConfig {
        self.snippets.clone().unwrap_or_default()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quire").join("config.toml"))
}
