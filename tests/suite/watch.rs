//! File changes reaching the registry through the directory watcher.

use std::time::{Duration, Instant};

use quire_registry::{SnippetsConfig, WatchEvent, WatchEventKind};

use crate::common::{Workspace, key, offered, unseeded};

#[test]
fn burst_of_events_rebuilds_once_after_debounce() {
    let ws = Workspace::new();
    let mut service = ws.start_with(SnippetsConfig {
        debounce_ms: 60_000,
        ..unseeded()
    });
    service.on_context_change(key("go"));
    let tx = service.event_sender();

    let go = ws.write("go.json", r#"{"Main": {"prefix": "main", "body": "x"}}"#);
    let all = ws.write("all.json", r#"{"Test": {"prefix": "test", "body": "y"}}"#);
    tx.try_send(WatchEvent::new(WatchEventKind::Created, go)).unwrap();
    tx.try_send(WatchEvent::new(WatchEventKind::Changed, all)).unwrap();

    assert_eq!(service.poll_events(32), 2);
    assert!(service.has_pending_rebuild());
    assert!(!service.flush(Instant::now()));
    assert!(offered(&service, "go", "ma").is_empty());

    assert!(service.flush(Instant::now() + Duration::from_secs(61)));
    assert!(!service.has_pending_rebuild());
    assert_eq!(offered(&service, "go", "ma"), ["main"]);
    assert_eq!(offered(&service, "go", "te"), ["test"]);
}

#[test]
fn events_outside_the_snippets_dir_are_ignored() {
    let ws = Workspace::new();
    let mut service = ws.start_with(unseeded());
    let tx = service.event_sender();

    let elsewhere = ws.root().join("go.json");
    tx.try_send(WatchEvent::new(WatchEventKind::Created, elsewhere)).unwrap();

    assert_eq!(service.poll_events(32), 1);
    assert!(!service.has_pending_rebuild());
}

#[tokio::test]
async fn watcher_feeds_the_service() {
    let ws = Workspace::new();
    let mut service = ws.start_with(SnippetsConfig {
        debounce_ms: 0,
        ..unseeded()
    });
    service.on_context_change(key("go"));
    let watcher = service.watch().unwrap();
    assert_eq!(watcher.dir(), ws.snippets_dir());

    ws.write("go.json", r#"{"Main": {"prefix": "main", "body": "x"}}"#);

    let deadline = Instant::now() + Duration::from_secs(5);
    while offered(&service, "go", "ma").is_empty() {
        assert!(Instant::now() < deadline, "watcher never delivered go.json");
        tokio::time::sleep(Duration::from_millis(10)).await;
        service.poll_events(32);
        service.flush(Instant::now());
    }

    ws.remove("go.json");
    let deadline = Instant::now() + Duration::from_secs(5);
    while !offered(&service, "go", "ma").is_empty() {
        assert!(Instant::now() < deadline, "watcher never reported the deletion");
        tokio::time::sleep(Duration::from_millis(10)).await;
        service.poll_events(32);
        service.flush(Instant::now());
    }
}
