//! Transcription collaborator boundary.
//!
//! The core never owns speech recognition; it talks to a [`Transcriber`]
//! that turns audio into text, either whole-file or as a stream of
//! incremental segments.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod mock;
pub mod whisper_api;

pub use mock::MockTranscriber;
pub use whisper_api::WhisperApiTranscriber;

use crate::config::TranscriptionConfig;
use anyhow::{bail, Context, Result};

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("recognition backend unavailable: {0}")]
    Unavailable(String),
    #[error("transcription request failed: {0}")]
    Request(String),
    #[error("failed to read audio file")]
    Io(#[from] std::io::Error),
}

/// One incremental recognition result emitted during streaming.
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub speaker: String,
    pub text: String,
    /// Milliseconds since the stream started.
    pub timestamp: u64,
    pub confidence: f32,
}

/// Live transcription stream. Segments arrive until the source is exhausted
/// or [`stop`](TranscriptStream::stop) is called.
#[derive(Debug)]
pub struct TranscriptStream {
    rx: mpsc::Receiver<TranscriptSegment>,
    cancel: CancellationToken,
}

impl TranscriptStream {
    pub fn new(rx: mpsc::Receiver<TranscriptSegment>, cancel: CancellationToken) -> Self {
        Self { rx, cancel }
    }

    /// Next segment, or `None` once the stream ended.
    pub async fn next_segment(&mut self) -> Option<TranscriptSegment> {
        self.rx.recv().await
    }

    /// Stop the stream. Idempotent: stopping twice is not an error.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transcribe a whole audio file into text.
    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, TranscriptionError>;

    /// Begin streaming recognition.
    fn start_stream(&self) -> Result<TranscriptStream, TranscriptionError>;
}

/// Construct the configured transcriber.
pub fn build_transcriber(config: &TranscriptionConfig) -> Result<Box<dyn Transcriber>> {
    match config.provider.as_str() {
        "mock" => Ok(Box::new(MockTranscriber::new())),
        "whisper-api" => {
            let api_key = config
                .api_key
                .clone()
                .context("api_key is required for the whisper-api provider")?;
            Ok(Box::new(WhisperApiTranscriber::new(
                api_key,
                config.api_endpoint.clone(),
                config.model.clone(),
            )))
        }
        other => bail!(
            "Unknown transcription provider '{}'. Supported providers: mock, whisper-api",
            other
        ),
    }
}
