//! OpenAI-compatible chat-completions summarizer.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use super::{SummarizationError, Summarizer};
use crate::meeting::MeetingSummary;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4";

const SYSTEM_PROMPT: &str = "You are an expert meeting summarizer. Analyze the meeting \
transcript and extract: key points discussed, action items with assignees, decisions made, \
next steps, attendees mentioned, main topics covered, and overall sentiment. Respond with a \
single JSON object with the fields keyPoints, actionItems, decisions, nextSteps, attendees, \
topics, sentiment.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: String, endpoint: Option<String>, model: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        info!(
            "Initialized OpenAI summarizer with model {} at {}",
            model, endpoint
        );
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
            model,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn summarize(&self, transcript: &str) -> Result<MeetingSummary, SummarizationError> {
        info!("Requesting summary for {} chars of transcript", transcript.len());

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": transcript },
            ],
            "temperature": 0.3,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizationError::Unavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SummarizationError::Request(e.to_string()))?;

        if !status.is_success() {
            error!("Summary request failed with status {}: {}", status, text);
            return Err(SummarizationError::Request(format!(
                "status {}: {}",
                status, text
            )));
        }

        let chat: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| SummarizationError::MalformedResponse(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                SummarizationError::MalformedResponse("response contained no choices".to_string())
            })?;

        debug!("Raw summary content: {}", content);

        let summary: MeetingSummary = serde_json::from_str(content.trim())
            .map_err(|e| SummarizationError::MalformedResponse(e.to_string()))?;

        info!(
            "Summary ready: {} key points, {} action items",
            summary.key_points.len(),
            summary.action_items.len()
        );
        Ok(summary)
    }
}
