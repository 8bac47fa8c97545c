//! One completion source per language across context switches and rebuilds.

use crate::common::{Workspace, key};

#[test]
fn switching_back_and_forth_keeps_one_binding() {
    let ws = Workspace::new();
    ws.write("all.json", r#"{"Test": {"prefix": "test", "body": "x"}}"#);
    let mut service = ws.start();

    service.on_context_change(key("go"));
    service.on_context_change(key("python"));
    service.on_context_change(key("go"));

    assert_eq!(service.host().binding_count(&key("go")), 1);
    assert_eq!(service.host().binding_count(&key("python")), 1);
    assert_eq!(service.host().complete(&key("go"), "te").len(), 1);
}

#[test]
fn repeated_reloads_do_not_stack_bindings() {
    let ws = Workspace::new();
    ws.write("all.json", r#"{"Test": {"prefix": "test", "body": "x"}}"#);
    let mut service = ws.start();
    service.on_context_change(key("go"));

    for _ in 0..3 {
        service.reload();
    }

    assert_eq!(service.host().binding_count(&key("go")), 1);
    assert_eq!(service.host().complete(&key("go"), "test").len(), 1);
}

#[test]
fn reload_refreshes_inactive_bindings_too() {
    let ws = Workspace::new();
    let mut service = ws.start();
    service.on_context_change(key("go"));
    service.on_context_change(key("python"));

    ws.write("go.json", r#"{"Err": {"prefix": "iferr", "body": "if err != nil {}"}}"#);
    service.reload();

    let completions = service.host().complete(&key("go"), "iferr");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].definition().name(), "Err");
}

#[test]
fn shutdown_retires_every_binding() {
    let ws = Workspace::new();
    let mut service = ws.start();
    service.on_context_change(key("go"));
    service.on_context_change(key("css"));

    service.shutdown();

    assert_eq!(service.host().binding_count(&key("go")), 0);
    assert_eq!(service.host().binding_count(&key("css")), 0);
    assert_eq!(service.lifecycle().active_languages().count(), 0);
}
