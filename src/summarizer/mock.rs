//! Simulated summarization provider.
//!
//! Wraps the deterministic fallback extraction behind an artificial
//! processing delay so the dashboard shows a believable `analyzing` phase.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::{fallback_summary, SummarizationError, Summarizer};
use crate::meeting::MeetingSummary;

pub struct MockSummarizer {
    latency: Duration,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
        }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn summarize(&self, transcript: &str) -> Result<MeetingSummary, SummarizationError> {
        info!("Simulating AI summary generation");
        tokio::time::sleep(self.latency).await;
        Ok(fallback_summary(transcript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_summarizer_never_fails() {
        let summarizer = MockSummarizer::instant();
        let summary = summarizer.summarize("John: we should ship it.").await.unwrap();
        assert!(!summary.action_items.is_empty());
    }
}
