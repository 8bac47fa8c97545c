//! Index rebuilds over a real snippets directory.

use quire_registry::{SnippetError, SnippetIndex, SnippetsConfig, store};

use crate::common::{Workspace, errors, key, unseeded};

const GO: &str = r#"{"Main": {"prefix": "main", "body": ["func main() {", "\t$0", "}"]}}"#;
const PYTHON: &str = r#"{"Main": {"prefix": "main", "body": "if __name__ == '__main__':"}}"#;

#[test]
fn malformed_write_reports_exactly_one_failure() {
    let ws = Workspace::new();
    ws.write("go.json", GO);
    ws.write("python.json", PYTHON);
    let config = SnippetsConfig::default();
    let mut index = SnippetIndex::new(ws.root(), &config);
    assert!(index.rebuild().failures.is_empty());

    ws.write("python.json", "{\"Main\": {\"prefix\": ");
    let report = index.rebuild();

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        &report.failures[0],
        SnippetError::FileParseFailed(err) if err.path().ends_with("python.json")
    ));
    assert_eq!(index.effective_snippets(&key("go"))["Main"].body().lines().len(), 3);
    // The last good python.json stays in effect.
    assert_eq!(index.effective_snippets(&key("python"))["Main"].prefix(), "main");
}

#[test]
fn service_reports_one_error_notice_per_bad_file() {
    let ws = Workspace::new();
    ws.write("go.json", GO);
    ws.write("python.json", "[1, 2, 3]");
    ws.write("ruby.json", r#"{"Bad": {"prefix": "has space", "body": "x"}}"#);
    let mut service = ws.start();

    let notices = service.drain_notices();
    let errors = errors(&notices);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].message().contains("python.json"));
    assert!(errors[1].message().contains("ruby.json"));
    assert_eq!(service.index().languages().count(), 1);
}

#[test]
fn deleted_file_drops_out_of_the_index() {
    let ws = Workspace::new();
    let go = ws.write("go.json", GO);
    let mut index = SnippetIndex::new(ws.root(), &unseeded());
    index.rebuild();

    std::fs::remove_file(go).unwrap();
    let report = index.rebuild();

    assert_eq!(report.removed, [key("go")]);
    assert!(index.file(&key("go")).is_none());
    assert!(index.effective_snippets(&key("go")).is_empty());
}

#[test]
fn unrelated_files_are_ignored() {
    let ws = Workspace::new();
    ws.write("go.json", GO);
    ws.write("README.md", "# snippets");
    ws.write("notes.txt", "{}");
    std::fs::create_dir_all(ws.snippet_path("nested.json")).unwrap();
    let mut index = SnippetIndex::new(ws.root(), &unseeded());

    let report = index.rebuild();

    assert!(report.failures.is_empty());
    assert_eq!(report.loaded, [key("go")]);
}

#[test]
fn blocked_directory_degrades_to_empty_index() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.root().join(".vscode")).unwrap();
    std::fs::write(ws.snippets_dir(), "not a directory").unwrap();
    let mut service = ws.start();

    let notices = service.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level(), quire_registry::NoticeLevel::Warning);
    assert!(service.index().is_empty());

    service.on_context_change(key("go"));
    assert!(service.host().complete(&key("go"), "te").is_empty());
}

#[test]
fn rendered_files_parse_back_identically() {
    let ws = Workspace::new();
    let raw = r#"{
        "Log": {"prefix": "log", "body": "console.log($1);", "description": "Log output"},
        "Loop": {"prefix": "for", "body": ["for (let i = 0; i < $1; i++) {", "\t$0", "}"]},
        "Ünïcode": {"prefix": "uni", "body": ["// ✓"]}
    }"#;
    let path = ws.write("javascript.json", raw);

    let parsed = store::parse(&path, raw).unwrap();
    let rendered = store::render(&parsed).unwrap();
    let reparsed = store::parse(&path, &rendered).unwrap();

    assert_eq!(parsed, reparsed);
    let names: Vec<_> = reparsed.keys().map(String::as_str).collect();
    assert_eq!(names, ["Log", "Loop", "Ünïcode"]);
}
