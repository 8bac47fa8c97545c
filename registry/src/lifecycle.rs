//! Registration lifecycle: keeps exactly one completion source per language
//! registered with the host.
//!
//! The host owns the provider slots; we only hold the handles it returns.
//! Replacing a source retires the old handle and registers the new one inside
//! a single `&mut self` call with no suspension point in between, so a host
//! request can never observe zero or two sources for the same language.

use std::sync::Arc;

use indexmap::IndexMap;
use quire_types::LanguageKey;

use crate::index::SnippetIndex;
use crate::matcher::{Completion, PrefixMatcher};
use crate::store::SnippetMap;

/// Snapshot of a language's effective snippets plus the matching policy.
///
/// The host calls [`CompletionSource::suggest_at`] on each completion request.
#[derive(Debug, Clone)]
pub struct CompletionSource {
    snippets: Arc<SnippetMap>,
    matcher: PrefixMatcher,
}

impl CompletionSource {
    #[must_use]
    pub fn new(snippets: SnippetMap, matcher: PrefixMatcher) -> Self {
        Self {
            snippets: Arc::new(snippets),
            matcher,
        }
    }

    /// Suggestions for the text immediately before the cursor.
    #[must_use]
    pub fn suggest(&self, line_prefix: &str) -> Vec<Completion> {
        self.matcher.matches(&self.snippets, line_prefix)
    }

    /// Suggestions for a cursor at character column `cursor` of `line`.
    ///
    /// Columns past the end of the line are clamped to the line end.
    #[must_use]
    pub fn suggest_at(&self, line: &str, cursor: usize) -> Vec<Completion> {
        let end = line
            .char_indices()
            .nth(cursor)
            .map_or(line.len(), |(byte, _)| byte);
        self.suggest(&line[..end])
    }
}

/// The host's completion-provider registration surface.
pub trait CompletionHost {
    /// Token identifying one registration, returned to the host to retire it.
    type Handle;

    fn register(&mut self, language: &LanguageKey, source: CompletionSource) -> Self::Handle;

    fn unregister(&mut self, handle: Self::Handle);
}

pub struct RegistrationLifecycle<H: CompletionHost> {
    host: H,
    matcher: PrefixMatcher,
    current: Option<LanguageKey>,
    active: IndexMap<LanguageKey, H::Handle>,
}

impl<H: CompletionHost> RegistrationLifecycle<H> {
    #[must_use]
    pub fn new(host: H, matcher: PrefixMatcher) -> Self {
        Self {
            host,
            matcher,
            current: None,
            active: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Language of the active editing context, if one has been reported.
    #[must_use]
    pub fn current_language(&self) -> Option<&LanguageKey> {
        self.current.as_ref()
    }

    /// Languages that currently hold a registration.
    pub fn active_languages(&self) -> impl Iterator<Item = &LanguageKey> {
        self.active.keys()
    }

    /// The active editing context switched to `language`.
    pub fn on_context_change(&mut self, language: LanguageKey, index: &SnippetIndex) {
        tracing::debug!(language = %language, "Editing context changed");
        self.current = Some(language.clone());
        self.install(language, index);
    }

    /// The index was rebuilt: refresh every registered language and the
    /// current one, so no source keeps serving stale snippets.
    pub fn on_index_rebuilt(&mut self, index: &SnippetIndex) {
        let mut languages: Vec<LanguageKey> = self.active.keys().cloned().collect();
        if let Some(current) = &self.current
            && !self.active.contains_key(current)
        {
            languages.push(current.clone());
        }
        for language in languages {
            self.install(language, index);
        }
    }

    fn install(&mut self, language: LanguageKey, index: &SnippetIndex) {
        let snippets = index.effective_snippets(&language);
        let count = snippets.len();
        let source = CompletionSource::new(snippets, self.matcher);

        if let Some(previous) = self.active.shift_remove(&language) {
            self.host.unregister(previous);
        }
        let handle = self.host.register(&language, source);
        self.active.insert(language.clone(), handle);

        tracing::debug!(language = %language, snippets = count, "Completion source registered");
    }

    /// Retire every registration.
    pub fn shutdown(&mut self) {
        for (language, handle) in self.active.drain(..) {
            tracing::debug!(language = %language, "Completion source retired");
            self.host.unregister(handle);
        }
        self.current = None;
    }
}
