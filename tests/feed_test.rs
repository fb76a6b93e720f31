//! Stream bytes in, dashboard state out: the feed session and the store wired
//! together through the ingest task.

mod common;

use std::time::Duration;

use attendance_dashboard::feed::{FeedSession, StreamEnd};
use attendance_dashboard::models::dashboard::DashboardView;
use attendance_dashboard::store::{self, FeedStatus, RecordStore};
use common::*;
use serde_json::json;
use tokio::sync::mpsc;

fn sse(event: &str, path: &str, data: serde_json::Value) -> Vec<u8> {
    let payload = json!({ "path": path, "data": data });
    format!("event: {event}\ndata: {payload}\n\n").into_bytes()
}

#[test]
fn put_then_child_put_yields_growing_snapshots() {
    let ts = today_at_noon();
    let mut session = FeedSession::new();
    let store = RecordStore::new();

    let out = session.push(&sse("put", "/", java_java_ios()));
    assert_eq!(out.snapshots.len(), 1);
    for snap in out.snapshots {
        store.apply_snapshot(snap);
    }
    assert_eq!(store.current().records.len(), 3);

    let out = session.push(&sse("put", "/-Nnew", record("ADB", "9:00-10:00", &ts)));
    for snap in out.snapshots {
        store.apply_snapshot(snap);
    }
    let view = DashboardView::build(&store.current(), &filter_today("All Courses"), &utc());
    assert_eq!(view.summary.total_students, 4);
}

#[test]
fn deleting_a_child_removes_the_record() {
    let mut session = FeedSession::new();
    let store = RecordStore::new();
    let mut bytes = sse("put", "/", java_java_ios());
    bytes.extend(sse("put", "/-Nx0000", serde_json::Value::Null));
    for snap in session.push(&bytes).snapshots {
        store.apply_snapshot(snap);
    }
    assert_eq!(store.current().records.len(), 2);
}

#[test]
fn patch_nulling_every_field_deletes_the_record() {
    let mut session = FeedSession::new();
    let store = RecordStore::new();
    let mut bytes = sse("put", "/", java_java_ios());
    bytes.extend(sse(
        "patch",
        "/-Nx0001",
        json!({"course": null, "name": null, "section": null, "timings": null, "timestamp": null}),
    ));
    for snap in session.push(&bytes).snapshots {
        store.apply_snapshot(snap);
    }
    let state = store.current();
    assert_eq!(state.status, FeedStatus::Normal);
    assert_eq!(state.records.len(), 2);
}

#[test]
fn patch_that_breaks_a_record_sets_error_and_keeps_old_list() {
    let mut session = FeedSession::new();
    let store = RecordStore::new();
    for snap in session.push(&sse("put", "/", java_java_ios())).snapshots {
        store.apply_snapshot(snap);
    }
    for snap in session.push(&sse("patch", "/-Nx0001", json!({"timestamp": 17}))).snapshots {
        store.apply_snapshot(snap);
    }
    let state = store.current();
    assert!(state.status.is_error());
    assert_eq!(state.records.len(), 3);

    // fixing the field recovers
    let fixed = json!({ "timestamp": today_at_noon() });
    for snap in session.push(&sse("patch", "/-Nx0001", fixed)).snapshots {
        store.apply_snapshot(snap);
    }
    assert_eq!(store.current().status, FeedStatus::Normal);
}

#[test]
fn auth_revoked_ends_the_stream() {
    let mut session = FeedSession::new();
    let out = session.push(b"event: auth_revoked\ndata: credential is no longer valid\n\n");
    assert_eq!(out.end, Some(StreamEnd::AuthRevoked));
}

#[actix_rt::test]
async fn ingest_task_applies_snapshots_in_order() {
    let store = RecordStore::new();
    let reader = store.reader();
    let (tx, rx) = mpsc::channel(8);

    let handle = store::spawn_ingest(store, rx);
    tx.send(java_java_ios()).await.unwrap();
    tx.send(snapshot(vec![])).await.unwrap();
    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("ingest finishes")
        .expect("ingest task");

    let state = reader.current();
    assert_eq!(state.version, 2);
    assert_eq!(state.status, FeedStatus::Normal);
    assert!(state.records.is_empty());
}
