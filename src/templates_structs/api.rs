use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::attendance::AttendanceRecord;
use crate::store::{FeedStatus, StoreState};

/// Raw record dump for `/api/v1/records`.
#[derive(Serialize, Debug, Clone)]
pub struct ApiRecordsResponse {
    pub status: FeedStatus,
    pub version: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub records: Arc<[AttendanceRecord]>,
}

impl From<&StoreState> for ApiRecordsResponse {
    fn from(s: &StoreState) -> Self {
        ApiRecordsResponse {
            status: s.status.clone(),
            version: s.version,
            updated_at: s.updated_at,
            total: s.records.len(),
            records: Arc::clone(&s.records),
        }
    }
}

/// Push message sent over the live-update socket.
#[derive(Serialize, Debug, Clone)]
pub struct SnapshotMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub version: u64,
    pub status: &'a FeedStatus,
}

impl<'a> From<&'a StoreState> for SnapshotMessage<'a> {
    fn from(s: &'a StoreState) -> Self {
        SnapshotMessage {
            kind: "snapshot",
            version: s.version,
            status: &s.status,
        }
    }
}
