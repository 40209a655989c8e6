//! Whisper-compatible HTTP transcription provider.
//!
//! Uploads the audio file as multipart form data to an OpenAI-style
//! `/audio/transcriptions` endpoint. No streaming mode: the HTTP API only
//! answers whole files.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info};

use super::{TranscriptStream, Transcriber, TranscriptionError};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl WhisperApiTranscriber {
    pub fn new(api_key: String, endpoint: Option<String>, model: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        info!("Initialized Whisper API provider with endpoint: {}", endpoint);
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    fn name(&self) -> &'static str {
        "whisper-api"
    }

    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        info!("Transcribing audio file via Whisper API: {:?}", audio_path);

        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "recording.wav".to_string());

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranscriptionError::Request(e.to_string()))?;

        if !status.is_success() {
            error!("Whisper API request failed with status {}: {}", status, body);
            return Err(TranscriptionError::Request(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| TranscriptionError::Request(format!("malformed response: {}", e)))?;

        let text = parsed.text.trim().to_string();
        info!("Transcription complete: {} chars", text.len());
        Ok(text)
    }

    fn start_stream(&self) -> Result<TranscriptStream, TranscriptionError> {
        Err(TranscriptionError::Unavailable(
            "whisper-api does not support streaming recognition".to_string(),
        ))
    }
}
