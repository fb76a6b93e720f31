//! The process-wide record cell.
//!
//! One writer (`RecordStore`, driven by the ingest task) and any number of
//! readers (`StoreReader`). Every snapshot replaces the record list wholesale.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, watch};

use crate::models::attendance::{AttendanceRecord, decode_snapshot};

/// User-visible message shown while the feed is in the error state.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading attendance data";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FeedStatus {
    /// No snapshot yet. Renders like `Normal` with no records.
    #[default]
    Loading,
    Normal,
    Error(String),
}

impl FeedStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, FeedStatus::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FeedStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Immutable published state. Readers hold an `Arc` to one version.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub status: FeedStatus,
    pub records: Arc<[AttendanceRecord]>,
    /// Bumped on every applied snapshot, successful or not.
    pub version: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct RecordStore {
    tx: watch::Sender<Arc<StoreState>>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(StoreState::default()));
        Self { tx }
    }

    pub fn reader(&self) -> StoreReader {
        StoreReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> Arc<StoreState> {
        self.tx.borrow().clone()
    }

    /// Decode and publish a snapshot. On failure the previous records stay and
    /// the status becomes `Error`.
    pub fn apply_snapshot(&self, snapshot: Value) -> FeedStatus {
        let previous = self.current();
        let next = match decode_snapshot(snapshot) {
            Ok(records) => {
                log::info!(
                    "Applied snapshot v{} with {} records",
                    previous.version + 1,
                    records.len()
                );
                StoreState {
                    status: FeedStatus::Normal,
                    records: records.into(),
                    version: previous.version + 1,
                    updated_at: Some(Utc::now()),
                }
            }
            Err(e) => {
                log::error!("Failed to decode attendance snapshot: {e}");
                StoreState {
                    status: FeedStatus::Error(LOAD_ERROR_MESSAGE.to_string()),
                    records: Arc::clone(&previous.records),
                    version: previous.version + 1,
                    updated_at: previous.updated_at,
                }
            }
        };
        let status = next.status.clone();
        self.tx.send_replace(Arc::new(next));
        status
    }
}

/// Cheap, cloneable read handle on the store.
#[derive(Debug, Clone)]
pub struct StoreReader {
    rx: watch::Receiver<Arc<StoreState>>,
}

impl StoreReader {
    pub fn current(&self) -> Arc<StoreState> {
        self.rx.borrow().clone()
    }

    /// A fresh receiver for change notifications.
    pub fn watch(&self) -> watch::Receiver<Arc<StoreState>> {
        self.rx.clone()
    }
}

/// Drain snapshots from the feed and apply them in arrival order. Ends when
/// every sender is gone.
pub fn spawn_ingest(
    store: RecordStore,
    mut rx: mpsc::Receiver<Value>,
) -> actix_web::rt::task::JoinHandle<()> {
    actix_web::rt::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            store.apply_snapshot(snapshot);
        }
        log::info!("Snapshot channel closed, ingest stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one_record(course: &str) -> Value {
        json!({
            "k": {"course": course, "name": "Ann", "section": "A", "timings": "9:00", "timestamp": "2024-03-01T09:00:00Z"}
        })
    }

    #[test]
    fn starts_loading_and_empty() {
        let store = RecordStore::new();
        let state = store.current();
        assert_eq!(state.status, FeedStatus::Loading);
        assert!(state.records.is_empty());
        assert_eq!(state.version, 0);
    }

    #[test]
    fn bad_snapshot_keeps_records() {
        let store = RecordStore::new();
        store.apply_snapshot(one_record("Java"));
        let status = store.apply_snapshot(json!({"k": {"course": 7}}));
        assert!(status.is_error());

        let state = store.current();
        assert_eq!(state.status.error_message(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].course, "Java");
        assert_eq!(state.version, 2);
    }

    #[test]
    fn readers_see_latest_publish() {
        let store = RecordStore::new();
        let reader = store.reader();
        store.apply_snapshot(one_record("iOS"));
        assert_eq!(reader.current().records[0].course, "iOS");
        assert_eq!(reader.current().status, FeedStatus::Normal);
    }

    #[test]
    fn status_serializes_tagged() {
        let v = serde_json::to_value(FeedStatus::Error("x".into())).unwrap();
        assert_eq!(v, json!({"state": "error", "message": "x"}));
        let v = serde_json::to_value(FeedStatus::Normal).unwrap();
        assert_eq!(v, json!({"state": "normal"}));
    }
}
