//! Line-protocol host: one JSON request per stdin line, JSON responses on
//! stdout.
//!
//! ```text
//! {"type":"focus","language":"go"}
//! {"type":"complete","line":"  te","cursor":4}
//! {"type":"add","language":"go"}
//! {"type":"list"}
//! {"type":"reload"}
//! {"type":"shutdown"}
//! ```
//!
//! Notices are written as `{"type":"notice",...}` lines as soon as they are
//! queued, including those from rebuilds triggered by file changes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use quire_registry::{
    Completion, InMemoryHost, Notice, SnippetService, SnippetWatcher, SnippetsConfig,
};
use quire_types::{LanguageKey, SnippetDefinition};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// How often watch events are drained and debounced rebuilds flushed.
const TICK: Duration = Duration::from_millis(50);

/// Maximum watch events processed per tick.
const EVENT_BUDGET: usize = 32;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Request {
    Focus {
        language: String,
    },
    Complete {
        line: String,
        /// Character column; defaults to the end of `line`.
        cursor: Option<usize>,
        /// Switches the active language first when given.
        language: Option<String>,
    },
    Add {
        language: String,
    },
    List {
        language: Option<String>,
    },
    Reload,
    Shutdown,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Response {
    Completions {
        language: String,
        items: Vec<CompletionItem>,
    },
    Snippets {
        language: String,
        items: Vec<SnippetItem>,
    },
    Added {
        language: String,
        path: PathBuf,
    },
    Notice(Notice),
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct SnippetItem {
    name: String,
    prefix: String,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<&SnippetDefinition> for SnippetItem {
    fn from(definition: &SnippetDefinition) -> Self {
        Self {
            name: definition.name().to_string(),
            prefix: definition.prefix().to_string(),
            body: definition.body().text(),
            description: definition.description().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionItem {
    #[serde(flatten)]
    snippet: SnippetItem,
    kind: &'static str,
    replace_len: usize,
}

impl From<&Completion> for CompletionItem {
    fn from(completion: &Completion) -> Self {
        Self {
            snippet: SnippetItem::from(completion.definition()),
            kind: completion.kind().label(),
            replace_len: completion.replace_len(),
        }
    }
}

fn error(message: impl Into<String>) -> Response {
    Response::Error {
        message: message.into(),
    }
}

/// Request handling, independent of stdio.
struct Session {
    service: SnippetService<InMemoryHost>,
    shutdown: bool,
}

impl Session {
    fn new(service: SnippetService<InMemoryHost>) -> Self {
        Self {
            service,
            shutdown: false,
        }
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Handle one request line. Blank lines are ignored.
    fn handle_line(&mut self, line: &str) -> Vec<Response> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let mut responses = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(e) => vec![error(format!("invalid request: {e}"))],
        };
        responses.extend(self.notices());
        responses
    }

    fn handle(&mut self, request: Request) -> Vec<Response> {
        match request {
            Request::Focus { language } => match LanguageKey::new(language) {
                Ok(language) => {
                    self.service.on_context_change(language);
                    Vec::new()
                }
                Err(e) => vec![error(e.to_string())],
            },
            Request::Complete {
                line,
                cursor,
                language,
            } => {
                if let Some(language) = language {
                    match LanguageKey::new(language) {
                        Ok(language) => self.service.on_context_change(language),
                        Err(e) => return vec![error(e.to_string())],
                    }
                }
                vec![self.complete(&line, cursor)]
            }
            Request::Add { language } => match LanguageKey::new(language) {
                Ok(language) => match self.service.add_snippet(&language) {
                    Ok(path) => vec![Response::Added {
                        language: language.to_string(),
                        path,
                    }],
                    // Already queued as a notice.
                    Err(_) => Vec::new(),
                },
                Err(e) => vec![error(e.to_string())],
            },
            Request::List { language } => {
                let language = match language.map(LanguageKey::new).transpose() {
                    Ok(language) => language,
                    Err(e) => return vec![error(e.to_string())],
                };
                let Some(language) =
                    language.or_else(|| self.service.lifecycle().current_language().cloned())
                else {
                    return vec![error("no active language")];
                };
                let items = self
                    .service
                    .effective_snippets(&language)
                    .values()
                    .map(SnippetItem::from)
                    .collect();
                vec![Response::Snippets {
                    language: language.to_string(),
                    items,
                }]
            }
            Request::Reload => {
                self.service.reload();
                Vec::new()
            }
            Request::Shutdown => {
                self.service.shutdown();
                self.shutdown = true;
                Vec::new()
            }
        }
    }

    fn complete(&self, line: &str, cursor: Option<usize>) -> Response {
        let Some(language) = self.service.lifecycle().current_language() else {
            return error("no active language");
        };
        let cursor = cursor.unwrap_or_else(|| line.chars().count());
        let items = self
            .service
            .host()
            .complete_at(language, line, cursor)
            .iter()
            .map(CompletionItem::from)
            .collect();
        Response::Completions {
            language: language.to_string(),
            items,
        }
    }

    /// Drain watch events and run a due rebuild.
    fn tick(&mut self, now: Instant) -> Vec<Response> {
        self.service.poll_events(EVENT_BUDGET);
        self.service.flush(now);
        self.notices()
    }

    fn notices(&mut self) -> Vec<Response> {
        self.service
            .drain_notices()
            .into_iter()
            .map(Response::Notice)
            .collect()
    }
}

async fn write_responses<W>(out: &mut W, responses: Vec<Response>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if responses.is_empty() {
        return Ok(());
    }
    for response in responses {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        out.write_all(line.as_bytes()).await?;
    }
    out.flush().await?;
    Ok(())
}

/// Run the line protocol until stdin closes, a shutdown request, or Ctrl-C.
pub async fn run(config: SnippetsConfig, workspace: Option<&Path>) -> Result<()> {
    let service = SnippetService::start(config, workspace, InMemoryHost::default())
        .context("failed to start snippet registry")?;
    let (watcher, watch_notice) = start_watcher(&service);
    let mut session = Session::new(service);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticks = tokio::time::interval(TICK);
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut startup = session.notices();
    startup.extend(watch_notice);
    write_responses(&mut stdout, startup).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                write_responses(&mut stdout, session.handle_line(&line)).await?;
                if session.is_shutdown() {
                    break;
                }
            }
            _ = ticks.tick() => {
                write_responses(&mut stdout, session.tick(Instant::now())).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    if !session.is_shutdown() {
        session.service.shutdown();
    }
    drop(watcher);
    Ok(())
}

/// Watch the snippets directory. Without a watcher the session still serves
/// requests; only `reload` picks up file changes.
fn start_watcher(
    service: &SnippetService<InMemoryHost>,
) -> (Option<SnippetWatcher>, Option<Response>) {
    match service.watch() {
        Ok(watcher) => (Some(watcher), None),
        Err(err) => {
            tracing::warn!(error = %err, "File watching unavailable");
            let notice = Notice::warning(format!("{err}; use reload to pick up changes"));
            (None, Some(Response::Notice(notice)))
        }
    }
}
