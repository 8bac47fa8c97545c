//! The "add snippet" command against real files.

use std::fs;

use quire_registry::{NoticeLevel, SnippetError};

use crate::common::{Workspace, errors, key};

#[test]
fn add_go_creates_directory_and_single_definition() {
    let ws = Workspace::new();
    let mut service = ws.start();
    assert!(ws.snippets_dir().is_dir());
    ws.write("python.json", r#"{"Main": {"prefix": "main", "body": "pass"}}"#);
    let python_before = ws.read("python.json");

    let path = service.add_snippet(&key("go")).unwrap();

    assert_eq!(path, ws.snippet_path("go.json"));
    let go = ws.read_json("go.json");
    let entries = go.as_object().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(go["Test"]["prefix"], "test");
    assert_eq!(go["Test"]["body"][0], "fmt.Println(\"Test\")");
    assert_eq!(go["Test"]["description"], "Test");
    assert_eq!(ws.read("python.json"), python_before);
}

#[test]
fn add_creates_missing_directory() {
    let ws = Workspace::new();
    let mut service = ws.start();
    fs::remove_dir_all(ws.snippets_dir()).unwrap();

    service.add_snippet(&key("ruby")).unwrap();

    assert_eq!(ws.read_json("ruby.json")["Test"]["body"][0], "puts \"Test\"");
    let notices = service.drain_notices();
    assert!(notices.iter().any(|n| n.message().starts_with("Created snippets directory")));
    assert!(notices.iter().any(|n| n.message() == "Snippet added to ruby.json"));
}

#[test]
fn add_merges_into_existing_definitions() {
    let ws = Workspace::new();
    ws.write(
        "css.json",
        r#"{"Flex": {"prefix": "flex", "body": "display: flex;"}, "Test": {"prefix": "old", "body": "x"}}"#,
    );
    let mut service = ws.start();

    service.add_snippet(&key("css")).unwrap();

    let css = ws.read_json("css.json");
    let names: Vec<_> = css.as_object().unwrap().keys().cloned().collect();
    assert_eq!(names, ["Flex", "Test"]);
    assert_eq!(css["Flex"]["body"][0], "display: flex;");
    assert_eq!(css["Test"]["prefix"], "test");
    assert_eq!(css["Test"]["body"].as_array().unwrap().len(), 3);
}

#[test]
fn adding_twice_keeps_one_definition() {
    let ws = Workspace::new();
    let mut service = ws.start();

    service.add_snippet(&key("php")).unwrap();
    service.add_snippet(&key("php")).unwrap();

    assert_eq!(ws.read_json("php.json").as_object().unwrap().len(), 1);
    assert_eq!(service.effective_snippets(&key("php")).len(), 1);
}

#[test]
fn added_snippet_is_offered_without_reload() {
    let ws = Workspace::new();
    let mut service = ws.start();
    service.on_context_change(key("go"));
    assert!(service.host().complete(&key("go"), "te").is_empty());

    service.add_snippet(&key("go")).unwrap();

    let completions = service.host().complete(&key("go"), "te");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].definition().body().text(), "fmt.Println(\"Test\")");
    assert_eq!(service.host().binding_count(&key("go")), 1);
}

#[test]
fn malformed_target_is_left_untouched() {
    let ws = Workspace::new();
    ws.write("java.json", "{\"Broken\": ");
    let mut service = ws.start();
    let _ = service.drain_notices();

    let err = service.add_snippet(&key("java")).unwrap_err();

    assert!(matches!(err, SnippetError::FileParseFailed(_)));
    assert_eq!(ws.read("java.json"), "{\"Broken\": ");
    let notices = service.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level(), NoticeLevel::Error);
    assert!(notices[0].message().contains("java.json"));
}

#[test]
fn seeding_creates_examples_once() {
    let ws = Workspace::new();
    let mut service = ws.start_with(quire_registry::SnippetsConfig::default());

    assert_eq!(ws.read_json("all.json")["Test"]["body"][0], "console.log('Test');");
    assert_eq!(ws.read("javascript.json"), "");
    assert!(errors(&service.drain_notices()).is_empty());

    ws.write("all.json", "{}");
    let created = service.seed_examples();
    assert!(created.is_empty());
    assert_eq!(ws.read("all.json"), "{}");
}
