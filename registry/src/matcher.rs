//! Prefix matcher: which snippets to offer for the text before the cursor.
//!
//! Editors ask for completions on every keystroke, so a snippet is offered
//! both while its trigger is being typed and once it has been typed in full:
//!
//! - **Complete**: the line text before the cursor ends with the prefix.
//! - **Partial**: the prefix starts with the trimmed text before the cursor.
//!
//! Only literal relations are used; there is no fuzzy or subsequence matching.

use quire_types::SnippetDefinition;
use serde::Deserialize;

use crate::store::SnippetMap;

/// What to offer when the text before the cursor is empty or only
/// whitespace. Every prefix starts with the empty string, so `MatchAll`
/// offers every snippet on a blank line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPrefixPolicy {
    #[default]
    MatchNothing,
    MatchAll,
}

/// Which relation produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The trigger has been typed in full.
    Complete,
    /// The trigger is partially typed.
    Partial,
}

impl MatchKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
        }
    }
}

/// A snippet offered at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    definition: SnippetDefinition,
    kind: MatchKind,
    /// Characters before the cursor that the body replaces.
    replace_len: usize,
}

impl Completion {
    #[must_use]
    pub fn definition(&self) -> &SnippetDefinition {
        &self.definition
    }

    #[must_use]
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Number of characters (not bytes) immediately before the cursor that the
    /// snippet body should replace.
    #[must_use]
    pub fn replace_len(&self) -> usize {
        self.replace_len
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixMatcher {
    empty_prefix: EmptyPrefixPolicy,
}

impl PrefixMatcher {
    #[must_use]
    pub fn new(empty_prefix: EmptyPrefixPolicy) -> Self {
        Self { empty_prefix }
    }

    /// Candidates for `line_prefix`, in the iteration order of `definitions`.
    ///
    /// The partial relation compares against the trimmed text before the
    /// cursor, so `"  te"` and `"te "` both offer `test` while `"x = te"`
    /// does not.
    #[must_use]
    pub fn matches(&self, definitions: &SnippetMap, line_prefix: &str) -> Vec<Completion> {
        let typed = line_prefix.trim();
        let allow_partial =
            !typed.is_empty() || matches!(self.empty_prefix, EmptyPrefixPolicy::MatchAll);
        // A partial match replaces everything from the first typed character.
        let partial_len = line_prefix.trim_start().chars().count();

        definitions
            .values()
            .filter_map(|definition| {
                let prefix = definition.prefix();
                let (kind, replace_len) = if line_prefix.ends_with(prefix) {
                    (MatchKind::Complete, prefix.chars().count())
                } else if allow_partial && prefix.starts_with(typed) {
                    (MatchKind::Partial, partial_len)
                } else {
                    return None;
                };
                Some(Completion {
                    definition: definition.clone(),
                    kind,
                    replace_len,
                })
            })
            .collect()
    }
}
