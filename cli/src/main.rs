//! Quire CLI: command-line host for the workspace snippet registry.
//!
//! One-shot commands (`init`, `add`, `list`, `complete`, `reload`) start the
//! registry for a workspace, run, print notices to stderr, and exit. `serve`
//! keeps the registry running with a file watcher and speaks JSON lines over
//! stdio (see [`serve`]).
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.

mod config;
mod picker;
mod serve;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use quire_registry::{
    InMemoryHost, Notice, NoticeLevel, SnippetError, SnippetService, SnippetsConfig,
};
use quire_types::{LanguageKey, SnippetDefinition};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::QuireConfig;

#[derive(Debug, Parser)]
#[command(name = "quire", version, about = "Workspace snippet registry")]
struct Cli {
    /// Workspace root. Defaults to the current directory.
    #[arg(long, short = 'w', global = true)]
    workspace: Option<PathBuf>,

    /// Config file. Defaults to ~/.quire/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Once(OneShot),
    /// Serve completions as JSON lines over stdin/stdout.
    Serve,
}

#[derive(Debug, Subcommand)]
enum OneShot {
    /// Create the example snippet files if they are missing.
    Init,
    /// Add the example `Test` snippet to a language's snippet file.
    Add {
        /// Language identifier; prompts with a picker when omitted.
        language: Option<String>,
    },
    /// Rescan the snippets directory and report files that fail to load.
    Reload,
    /// List snippets in effect.
    List {
        /// Show the merged snippets for one language instead of every file.
        #[arg(long, short)]
        language: Option<String>,
    },
    /// Print completions for the text before the cursor.
    Complete {
        #[arg(long, short)]
        language: String,
        /// Line text.
        text: String,
        /// Cursor column in characters. Defaults to the end of the text.
        #[arg(long)]
        cursor: Option<usize>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{}: {}", notice.level().label(), notice.message());
    }
}

fn parse_language(language: &str) -> Result<LanguageKey> {
    LanguageKey::new(language).with_context(|| format!("invalid language '{language}'"))
}

fn start(config: SnippetsConfig, workspace: Option<&Path>) -> Result<SnippetService<InMemoryHost>> {
    SnippetService::start(config, workspace, InMemoryHost::default())
        .context("failed to start snippet registry")
}

fn print_definition(indent: &str, definition: &SnippetDefinition) {
    println!(
        "{indent}{}\t{}\t{}",
        definition.prefix(),
        definition.name(),
        definition.description().unwrap_or_default()
    );
}

fn run_once(command: OneShot, mut config: SnippetsConfig, workspace: Option<&Path>) -> Result<()> {
    // Outside `serve`, example files are only created on request.
    config.seed_examples = matches!(command, OneShot::Init);
    let mut service = start(config, workspace)?;

    let outcome = execute(command, &mut service);

    let notices = service.drain_notices();
    print_notices(&notices);
    service.shutdown();
    conclude(outcome, &notices)
}

/// Exit status of a one-shot command whose notices have been printed.
///
/// A [`SnippetError`] returned by the registry is already among the notices,
/// so it only counts as a failure instead of being reported again.
fn conclude(outcome: Result<()>, notices: &[Notice]) -> Result<()> {
    let failed = match outcome {
        Ok(()) => false,
        Err(err) if err.is::<SnippetError>() => true,
        Err(err) => return Err(err),
    };

    let errors = notices
        .iter()
        .filter(|notice| notice.level() == NoticeLevel::Error)
        .count();
    if failed || errors > 0 {
        bail!("{} snippet operation(s) failed", errors.max(1));
    }
    Ok(())
}

fn execute(command: OneShot, service: &mut SnippetService<InMemoryHost>) -> Result<()> {
    match command {
        OneShot::Init => {
            println!("{}", service.index().dir().display());
        }
        OneShot::Add { language } => {
            let language = match language {
                Some(language) => parse_language(&language)?,
                None => match picker::pick_language()? {
                    Some(language) => language,
                    None => {
                        eprintln!("Cancelled");
                        return Ok(());
                    }
                },
            };
            let path = service.add_snippet(&language)?;
            println!("{}", path.display());
        }
        // `start` has just rebuilt the index.
        OneShot::Reload => {
            let files = service.index().languages().count();
            println!(
                "Loaded {files} snippet file(s) from {}",
                service.index().dir().display()
            );
        }
        OneShot::List {
            language: Some(language),
        } => {
            let language = parse_language(&language)?;
            for definition in service.effective_snippets(&language).values() {
                print_definition("", definition);
            }
        }
        OneShot::List { language: None } => {
            for file in service.index().files() {
                println!("{}\t{}", file.language(), file.path().display());
                for definition in file.snippets().values() {
                    print_definition("  ", definition);
                }
            }
        }
        OneShot::Complete {
            language,
            text,
            cursor,
        } => {
            let language = parse_language(&language)?;
            service.on_context_change(language.clone());
            let cursor = cursor.unwrap_or_else(|| text.chars().count());
            for completion in service.host().complete_at(&language, &text, cursor) {
                let definition = completion.definition();
                println!(
                    "{}\t{}\t{}\t{}",
                    definition.prefix(),
                    definition.name(),
                    completion.kind().label(),
                    completion.replace_len()
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = QuireConfig::load(cli.config.as_deref())?
        .unwrap_or_default()
        .snippets();
    let workspace = cli.workspace.or_else(|| env::current_dir().ok());

    match cli.command {
        Command::Serve => serve::run(config, workspace.as_deref()).await,
        Command::Once(command) => run_once(command, config, workspace.as_deref()),
    }
}
