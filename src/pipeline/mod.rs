//! Meeting processing pipeline.
//!
//! Drives the recording/upload flow: transcript in, summarized meeting out.
//! Transcription failures propagate to the caller (the upload flow owns
//! user notification); summarization failures are absorbed with a
//! deterministic fallback so the meeting still completes.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::meeting::{Meeting, MeetingStatus, MeetingStore};
use crate::summarizer::{fallback_summary, Summarizer};
use crate::transcription::{Transcriber, TranscriptionError};

#[derive(Clone)]
pub struct MeetingPipeline {
    store: MeetingStore,
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
    cancel: CancellationToken,
}

impl MeetingPipeline {
    pub fn new(
        store: MeetingStore,
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            store,
            transcriber,
            summarizer,
            cancel: CancellationToken::new(),
        }
    }

    /// Token covering all in-flight pipeline work. Cancelling it aborts
    /// pending simulated latency instead of leaving timers dangling.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Process a finished recording or a directly supplied transcript:
    /// insert as `analyzing`, summarize, attach the summary.
    pub async fn ingest_transcript(
        &self,
        title: Option<String>,
        transcript: String,
    ) -> Result<Meeting> {
        let title = title.unwrap_or_else(|| {
            format!("Meeting - {}", chrono::Utc::now().format("%Y-%m-%d"))
        });
        let meeting = Meeting::new(title, MeetingStatus::Analyzing)
            .with_participants(vec!["Current User".to_string()])
            .with_transcript(transcript.clone());
        let id = meeting.id.clone();

        info!("Processing meeting {} ({} chars of transcript)", id, transcript.len());
        self.store.add(meeting).await;

        let summary = tokio::select! {
            _ = self.cancel.cancelled() => {
                return Err(anyhow!("meeting processing cancelled"));
            }
            result = self.summarizer.summarize(&transcript) => match result {
                Ok(summary) => summary,
                Err(e) => {
                    warn!("Summarization failed for meeting {}: {}. Using fallback.", id, e);
                    fallback_summary(&transcript)
                }
            },
        };

        self.store.attach_summary(&id, summary).await;
        info!("Meeting {} completed", id);

        self.store
            .get(&id)
            .await
            .ok_or_else(|| anyhow!("meeting {} disappeared during processing", id))
    }

    /// Upload flow: transcribe the audio file first, then process as above.
    ///
    /// Transcription errors are returned to the caller unabsorbed — the
    /// upload flow surfaces them to the user and nothing is inserted.
    pub async fn ingest_audio(
        &self,
        title: Option<String>,
        audio_path: &std::path::Path,
    ) -> Result<Meeting, IngestError> {
        let transcript = self.transcriber.transcribe_file(audio_path).await?;
        self.ingest_transcript(title, transcript)
            .await
            .map_err(IngestError::Processing)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error("meeting processing failed: {0}")]
    Processing(anyhow::Error),
}
