//! Core domain types for Quire.
//!
//! This crate contains pure snippet domain types with no IO, no async, and
//! minimal dependencies. Invariants are enforced at construction time, so a
//! `SnippetDefinition` or `LanguageKey` that exists is always valid.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod example;
mod language;
mod snippet;

pub use example::{
    COMMON_LANGUAGES, EXAMPLE_DESCRIPTION, EXAMPLE_NAME, EXAMPLE_PREFIX, example_body,
    example_definition,
};
pub use language::{LanguageKey, LanguageKeyError};
pub use snippet::{SnippetBody, SnippetDefinition, SnippetDefinitionError};
