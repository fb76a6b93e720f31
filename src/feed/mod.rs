//! Live subscription to the realtime database collection.
//!
//! Uses the REST streaming endpoint (`Accept: text/event-stream`). Every
//! `put`/`patch` is folded into a local copy of the collection and the whole
//! collection is sent on as a snapshot.

pub mod sse;
pub mod tree;

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::errors::AppError;
use self::sse::{SseEvent, SseParser};
use self::tree::SnapshotTree;

/// A decoded stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
    Unknown(String),
}

#[derive(Deserialize)]
struct PathData {
    path: String,
    data: Value,
}

impl FeedEvent {
    pub fn parse(ev: &SseEvent) -> Result<Self, serde_json::Error> {
        Ok(match ev.event.as_str() {
            "put" => {
                let PathData { path, data } = serde_json::from_str(&ev.data)?;
                FeedEvent::Put { path, data }
            }
            "patch" => {
                let PathData { path, data } = serde_json::from_str(&ev.data)?;
                FeedEvent::Patch { path, data }
            }
            "keep-alive" => FeedEvent::KeepAlive,
            "cancel" => FeedEvent::Cancel(ev.data.clone()),
            "auth_revoked" => FeedEvent::AuthRevoked,
            other => FeedEvent::Unknown(other.to_string()),
        })
    }
}

/// Why a single connection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// Server closed the response body.
    Eof,
    Cancelled(String),
    AuthRevoked,
    /// Nobody is listening for snapshots any more.
    ReceiverGone,
}

/// Folds stream events into snapshots. Reset on every reconnect.
#[derive(Debug, Default)]
pub struct FeedSession {
    parser: SseParser,
    tree: SnapshotTree,
}

/// Outcome of feeding one chunk to a session.
#[derive(Debug, Default)]
pub struct ChunkOutcome {
    pub snapshots: Vec<Value>,
    pub end: Option<StreamEnd>,
}

impl FeedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> ChunkOutcome {
        let mut outcome = ChunkOutcome::default();
        for ev in self.parser.push(chunk) {
            match FeedEvent::parse(&ev) {
                Ok(FeedEvent::Put { path, data }) => {
                    self.tree.put(&path, data);
                    outcome.snapshots.push(self.tree.snapshot());
                }
                Ok(FeedEvent::Patch { path, data }) => {
                    self.tree.patch(&path, data);
                    outcome.snapshots.push(self.tree.snapshot());
                }
                Ok(FeedEvent::KeepAlive) => {}
                Ok(FeedEvent::Cancel(reason)) => {
                    outcome.end = Some(StreamEnd::Cancelled(reason));
                    return outcome;
                }
                Ok(FeedEvent::AuthRevoked) => {
                    outcome.end = Some(StreamEnd::AuthRevoked);
                    return outcome;
                }
                Ok(FeedEvent::Unknown(name)) => log::debug!("Ignoring feed event '{name}'"),
                Err(e) => log::warn!("Skipping malformed '{}' event: {e}", ev.event),
            }
        }
        outcome
    }
}

/// Handle on the running subscription. Dropping it stops the stream.
#[derive(Debug)]
pub struct Subscription {
    handle: actix_web::rt::task::JoinHandle<()>,
}

impl Subscription {
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("attendance-dashboard/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Start streaming `endpoint` into `tx`, reconnecting after `reconnect_delay`
/// whenever a connection ends.
pub fn subscribe(
    client: reqwest::Client,
    endpoint: String,
    reconnect_delay: Duration,
    tx: mpsc::Sender<Value>,
) -> Subscription {
    let handle = actix_web::rt::spawn(async move {
        loop {
            log::info!("Connecting to feed {endpoint}");
            match stream_once(&client, &endpoint, &tx).await {
                Ok(StreamEnd::ReceiverGone) => {
                    log::info!("Snapshot receiver dropped, closing feed");
                    return;
                }
                Ok(end) => log::warn!("Feed stream ended: {end:?}"),
                Err(e) => log::error!("{e}"),
            }
            tokio::time::sleep(reconnect_delay).await;
        }
    });
    Subscription { handle }
}

async fn stream_once(
    client: &reqwest::Client,
    endpoint: &str,
    tx: &mpsc::Sender<Value>,
) -> Result<StreamEnd, AppError> {
    let mut response = client
        .get(endpoint)
        .header(ACCEPT, "text/event-stream")
        .send()
        .await?
        .error_for_status()?;
    log::info!("Feed connected ({})", response.status());

    let mut session = FeedSession::new();
    while let Some(chunk) = response.chunk().await? {
        let outcome = session.push(&chunk);
        for snapshot in outcome.snapshots {
            if tx.send(snapshot).await.is_err() {
                return Ok(StreamEnd::ReceiverGone);
            }
        }
        if let Some(end) = outcome.end {
            return Ok(end);
        }
    }
    Ok(StreamEnd::Eof)
}
