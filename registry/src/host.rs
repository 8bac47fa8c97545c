//! In-process completion host.
//!
//! Holds registered sources per language the way an editor's provider table
//! would, and answers completion requests by asking every source registered
//! for the language. Used by the line-protocol host and by tests, where a
//! duplicate registration shows up as duplicate suggestions.

use indexmap::IndexMap;
use quire_types::LanguageKey;

use crate::lifecycle::{CompletionHost, CompletionSource};
use crate::matcher::Completion;

/// Registration token handed out by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingHandle {
    id: u64,
    language: LanguageKey,
}

#[derive(Debug, Default)]
pub struct InMemoryHost {
    next_id: u64,
    slots: IndexMap<LanguageKey, Vec<(u64, CompletionSource)>>,
}

impl CompletionHost for InMemoryHost {
    type Handle = BindingHandle;

    fn register(&mut self, language: &LanguageKey, source: CompletionSource) -> BindingHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.slots
            .entry(language.clone())
            .or_default()
            .push((id, source));
        BindingHandle {
            id,
            language: language.clone(),
        }
    }

    fn unregister(&mut self, handle: BindingHandle) {
        if let Some(bindings) = self.slots.get_mut(&handle.language) {
            bindings.retain(|(id, _)| *id != handle.id);
            if bindings.is_empty() {
                self.slots.shift_remove(&handle.language);
            }
        }
    }
}

impl InMemoryHost {
    /// Number of sources registered for `language`.
    #[must_use]
    pub fn binding_count(&self, language: &LanguageKey) -> usize {
        self.slots.get(language).map_or(0, Vec::len)
    }

    /// Suggestions from every source registered for `language`.
    #[must_use]
    pub fn complete(&self, language: &LanguageKey, line_prefix: &str) -> Vec<Completion> {
        self.sources(language)
            .flat_map(|source| source.suggest(line_prefix))
            .collect()
    }

    /// Suggestions for a cursor at character column `cursor` of `line`.
    #[must_use]
    pub fn complete_at(&self, language: &LanguageKey, line: &str, cursor: usize) -> Vec<Completion> {
        self.sources(language)
            .flat_map(|source| source.suggest_at(line, cursor))
            .collect()
    }

    fn sources(&self, language: &LanguageKey) -> impl Iterator<Item = &CompletionSource> {
        self.slots
            .get(language)
            .into_iter()
            .flatten()
            .map(|(_, source)| source)
    }
}
