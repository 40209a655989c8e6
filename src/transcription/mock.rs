//! Simulated transcription provider.
//!
//! Used when no real speech backend is configured: file transcription
//! returns canned text after an artificial delay, streaming emits the same
//! text word by word until stopped.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{TranscriptSegment, TranscriptStream, Transcriber, TranscriptionError};

const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg", "webm", "flac"];

const CANNED_TRANSCRIPT: &str = "This is a simulated transcription of the audio file. \
In a production deployment this text would come from a speech recognition service. \
John: We need to update the project timeline based on the new requirements. \
Sarah: Agreed, and we should schedule a follow-up meeting with stakeholders. \
We decided to postpone feature X to next quarter.";

pub struct MockTranscriber {
    latency: Duration,
    segment_interval: Duration,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(3),
            segment_interval: Duration::from_millis(300),
        }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            segment_interval: Duration::ZERO,
        }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let extension = audio_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(TranscriptionError::UnsupportedFormat(
                audio_path.to_string_lossy().to_string(),
            ));
        }

        info!("Simulating transcription of {:?}", audio_path);
        tokio::time::sleep(self.latency).await;

        Ok(CANNED_TRANSCRIPT.to_string())
    }

    fn start_stream(&self) -> Result<TranscriptStream, TranscriptionError> {
        let (tx, rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let interval = self.segment_interval;

        tokio::spawn(async move {
            let words: Vec<&str> = CANNED_TRANSCRIPT.split_whitespace().collect();
            let mut elapsed_ms = 0u64;
            for (i, chunk) in words.chunks(4).enumerate() {
                if token.is_cancelled() {
                    break;
                }
                let segment = TranscriptSegment {
                    speaker: "Speaker".to_string(),
                    text: chunk.join(" "),
                    timestamp: elapsed_ms,
                    // Confidence cycles through a plausible band
                    confidence: 0.8 + 0.03 * ((i % 5) as f32),
                };
                tokio::select! {
                    _ = token.cancelled() => break,
                    result = tx.send(segment) => {
                        if result.is_err() {
                            break;
                        }
                    }
                }
                elapsed_ms += interval.as_millis() as u64;
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        Ok(TranscriptStream::new(rx, cancel))
    }
}
