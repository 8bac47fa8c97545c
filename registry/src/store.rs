//! Snippet store: parses one snippet file into `name → definition`.
//!
//! A file is always parsed as a whole. The caller either gets the complete
//! mapping or a [`ParseError`]; there is no partially-applied state.

use std::path::Path;

use indexmap::IndexMap;
use quire_types::SnippetDefinition;
use serde::Deserialize;

use crate::error::{ParseError, ParseErrorKind};

/// Snippets of one file (or an effective view), in insertion order.
pub type SnippetMap = IndexMap<String, SnippetDefinition>;

/// On-disk definition shape before validation.
#[derive(Debug, Deserialize)]
struct RawDefinition {
    prefix: String,
    body: RawBody,
    #[serde(default)]
    description: Option<String>,
}

/// `body` may be written as a single line or a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBody {
    Line(String),
    Lines(Vec<String>),
}

impl RawBody {
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Line(line) => vec![line],
            Self::Lines(lines) => lines,
        }
    }
}

/// Parse the contents of the snippet file at `path`.
///
/// Empty or whitespace-only content is a valid file with no snippets.
/// Duplicate names keep their first position and the last value.
pub fn parse(path: &Path, raw: &str) -> Result<SnippetMap, ParseError> {
    if raw.trim().is_empty() {
        return Ok(SnippetMap::new());
    }

    let document: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| ParseError::new(path, ParseErrorKind::Syntax(e)))?;
    let serde_json::Value::Object(entries) = document else {
        return Err(ParseError::new(path, ParseErrorKind::NotAnObject));
    };

    let mut snippets = SnippetMap::with_capacity(entries.len());
    for (name, value) in entries {
        let raw_def: RawDefinition = match serde_json::from_value(value) {
            Ok(def) => def,
            Err(source) => {
                return Err(ParseError::new(path, ParseErrorKind::Shape { name, source }));
            }
        };
        let definition = SnippetDefinition::new(
            name.clone(),
            raw_def.prefix,
            raw_def.body.into_lines(),
            raw_def.description,
        )
        .map_err(|source| {
            let kind = ParseErrorKind::Invalid {
                name: name.clone(),
                source,
            };
            ParseError::new(path, kind)
        })?;
        snippets.insert(name, definition);
    }
    Ok(snippets)
}

/// Serialize snippets back into the file format (two-space indented JSON).
pub fn render(snippets: &SnippetMap) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snippets)
}
