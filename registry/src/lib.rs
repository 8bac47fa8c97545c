//! Workspace snippet registry.
//!
//! Loads snippet files from a workspace's snippets directory, indexes them by
//! language, matches the text before the cursor against snippet prefixes, and
//! keeps one completion source per language registered with the host.

pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod lifecycle;
pub mod matcher;
pub mod notice;
pub mod store;
pub mod watch;

mod service;

pub use config::SnippetsConfig;
pub use error::{ParseError, ParseErrorKind, SnippetError};
pub use host::{BindingHandle, InMemoryHost};
pub use index::{RebuildReport, SnippetFile, SnippetIndex};
pub use lifecycle::{CompletionHost, CompletionSource, RegistrationLifecycle};
pub use matcher::{Completion, EmptyPrefixPolicy, MatchKind, PrefixMatcher};
pub use notice::{Notice, NoticeLevel};
pub use service::SnippetService;
pub use store::SnippetMap;
pub use watch::{SnippetWatcher, WatchError, WatchEvent, WatchEventKind};
