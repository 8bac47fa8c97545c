//! Completion behaviour through the service and in-memory host.

use quire_registry::{EmptyPrefixPolicy, MatchKind, SnippetsConfig};

use crate::common::{Workspace, key, offered, unseeded};

const ALL_TEST: &str = r#"{"Test": {"prefix": "test", "body": ["log(1)"]}}"#;

#[test]
fn python_file_sees_all_snippets_while_typing() {
    let ws = Workspace::new();
    ws.write("all.json", ALL_TEST);
    ws.write("python.json", "{}");
    let mut service = ws.start();

    service.on_context_change(key("python"));

    let partial = service.host().complete(&key("python"), "te");
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].definition().name(), "Test");
    assert_eq!(partial[0].kind(), MatchKind::Partial);

    let complete = service.host().complete(&key("python"), "test");
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].kind(), MatchKind::Complete);
    assert_eq!(complete[0].definition().body().lines(), ["log(1)"]);
}

#[test]
fn every_nonempty_prefix_of_a_trigger_matches() {
    let ws = Workspace::new();
    ws.write(
        "rust.json",
        r#"{"Print": {"prefix": "println", "body": "println!(\"$1\");"}}"#,
    );
    let mut service = ws.start();
    service.on_context_change(key("rust"));

    for end in 1..="println".len() {
        let typed = &"println"[..end];
        assert_eq!(offered(&service, "rust", typed), ["println"], "typed {typed:?}");
    }
}

#[test]
fn language_file_overrides_all_by_name() {
    let ws = Workspace::new();
    ws.write(
        "all.json",
        r#"{"Log": {"prefix": "log", "body": "console.log($1)"}, "Todo": {"prefix": "todo", "body": "TODO: $1"}}"#,
    );
    ws.write(
        "python.json",
        r#"{"Log": {"prefix": "log", "body": "print($1)"}}"#,
    );
    let mut service = ws.start();
    service.on_context_change(key("python"));

    let effective = service.effective_snippets(&key("python"));
    assert_eq!(effective.len(), 2);
    assert_eq!(effective["Log"].body().text(), "print($1)");
    assert_eq!(effective["Todo"].body().text(), "TODO: $1");

    let completions = service.host().complete(&key("python"), "lo");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].definition().body().text(), "print($1)");
}

#[test]
fn partial_match_uses_trimmed_line_text() {
    let ws = Workspace::new();
    ws.write("all.json", ALL_TEST);
    let mut service = ws.start();
    service.on_context_change(key("go"));

    assert_eq!(offered(&service, "go", "  te"), ["test"]);
    assert_eq!(offered(&service, "go", "te "), ["test"]);
    assert!(offered(&service, "go", "x := te").is_empty());
    assert_eq!(offered(&service, "go", "mytest"), ["test"]);

    let trailing = service.host().complete(&key("go"), "\tte ");
    assert_eq!(trailing[0].kind(), MatchKind::Partial);
    assert_eq!(trailing[0].replace_len(), 3);
}

#[test]
fn cursor_column_limits_the_typed_text() {
    let ws = Workspace::new();
    ws.write("all.json", ALL_TEST);
    let mut service = ws.start();
    service.on_context_change(key("go"));

    let completions = service.host().complete_at(&key("go"), "test(); // ünïcode", 4);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].kind(), MatchKind::Complete);
    assert_eq!(completions[0].replace_len(), 4);
}

#[test]
fn blank_line_policy_is_configurable() {
    let ws = Workspace::new();
    ws.write("all.json", ALL_TEST);

    let mut strict = ws.start();
    strict.on_context_change(key("go"));
    assert!(offered(&strict, "go", "   ").is_empty());

    let mut eager = ws.start_with(SnippetsConfig {
        empty_prefix: EmptyPrefixPolicy::MatchAll,
        ..unseeded()
    });
    eager.on_context_change(key("go"));
    assert_eq!(offered(&eager, "go", "   "), ["test"]);
}

#[test]
fn unfocused_language_gets_nothing() {
    let ws = Workspace::new();
    ws.write("all.json", ALL_TEST);
    let mut service = ws.start();
    service.on_context_change(key("go"));

    assert!(offered(&service, "python", "te").is_empty());
}
