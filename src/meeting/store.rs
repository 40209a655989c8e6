//! In-memory meeting store.
//!
//! Holds the canonical list of meetings for the current session and provides
//! id-scoped mutation primitives. Every successful mutation republishes the
//! full collection to subscribers within the same call — there is no
//! asynchronous dispatch queue.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use super::model::{Meeting, MeetingStatus, MeetingSummary};

/// Shared handle to the meeting collection.
///
/// Mutations targeting an unknown id are silently ignored: a lagging
/// simulator tick talking to a freshly reseeded store must never fail.
#[derive(Clone)]
pub struct MeetingStore {
    inner: Arc<Mutex<Vec<Meeting>>>,
    tx: watch::Sender<Vec<Meeting>>,
}

impl MeetingStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
            tx,
        }
    }

    /// Create a store pre-populated with `meetings` (newest first).
    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        let (tx, _rx) = watch::channel(meetings.clone());
        Self {
            inner: Arc::new(Mutex::new(meetings)),
            tx,
        }
    }

    /// Subscribe to collection updates. The receiver always starts with the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Meeting>> {
        self.tx.subscribe()
    }

    /// Clone of the current collection, newest first.
    pub async fn snapshot(&self) -> Vec<Meeting> {
        self.inner.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Meeting> {
        self.inner
            .lock()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    /// Insert a meeting at the front of the collection.
    ///
    /// Ids are not validated: a duplicate produces a second row rather than
    /// an error. Callers guarantee uniqueness (UUIDs in practice).
    pub async fn add(&self, meeting: Meeting) {
        let mut meetings = self.inner.lock().await;
        if meetings.iter().any(|m| m.id == meeting.id) {
            warn!("Inserting meeting with duplicate id {}", meeting.id);
        }
        meetings.insert(0, meeting);
        self.publish(&meetings);
    }

    /// Replace the status of the meeting with `id`. No-op on unknown id.
    ///
    /// The monotonic-progression invariant is not checked here; callers only
    /// ever request single-step forward transitions.
    pub async fn update_status(&self, id: &str, status: MeetingStatus) -> bool {
        let mut meetings = self.inner.lock().await;
        match meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.status = status;
                meeting.touch();
                self.publish(&meetings);
                true
            }
            None => {
                debug!("update_status: meeting {} not found, ignoring", id);
                false
            }
        }
    }

    /// Replace the progress value (clamped to 0..=100). No-op on unknown id.
    pub async fn update_progress(&self, id: &str, progress: u8) -> bool {
        let mut meetings = self.inner.lock().await;
        match meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.progress = Some(progress.min(100));
                meeting.touch();
                self.publish(&meetings);
                true
            }
            None => {
                debug!("update_progress: meeting {} not found, ignoring", id);
                false
            }
        }
    }

    /// Attach the final transcript once upstream processing produced it.
    pub async fn attach_transcript(&self, id: &str, transcript: impl Into<String>) -> bool {
        let mut meetings = self.inner.lock().await;
        match meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.transcript = Some(transcript.into());
                meeting.touch();
                self.publish(&meetings);
                true
            }
            None => {
                debug!("attach_transcript: meeting {} not found, ignoring", id);
                false
            }
        }
    }

    /// Attach a summary and mark the meeting completed in one mutation.
    ///
    /// This is the only way a summary enters the store, which keeps the
    /// "summary present implies completed" coupling a store-boundary
    /// invariant.
    pub async fn attach_summary(&self, id: &str, summary: MeetingSummary) -> bool {
        let mut meetings = self.inner.lock().await;
        match meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.summary = Some(summary);
                meeting.status = MeetingStatus::Completed;
                meeting.touch();
                self.publish(&meetings);
                true
            }
            None => {
                debug!("attach_summary: meeting {} not found, ignoring", id);
                false
            }
        }
    }

    /// Wholesale replacement of the collection, discarding any updates not
    /// present in the new snapshot.
    pub async fn replace_snapshot(&self, meetings: Vec<Meeting>) {
        let mut current = self.inner.lock().await;
        *current = meetings;
        self.publish(&current);
    }

    fn publish(&self, meetings: &[Meeting]) {
        // send_replace never fails, even with no subscribers
        self.tx.send_replace(meetings.to_vec());
    }
}

impl Default for MeetingStore {
    fn default() -> Self {
        Self::new()
    }
}
