//! Summarization collaborator boundary.
//!
//! Turns a transcript into a structured [`MeetingSummary`]. Provider
//! failures never surface to the end user: the pipeline falls back to the
//! deterministic placeholder in [`fallback`].

use async_trait::async_trait;
use thiserror::Error;

pub mod fallback;
pub mod mock;
pub mod openai;

pub use fallback::fallback_summary;
pub use mock::MockSummarizer;
pub use openai::OpenAiSummarizer;

use crate::config::SummarizerConfig;
use crate::meeting::MeetingSummary;
use anyhow::{bail, Context, Result};

#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("summarization request failed: {0}")]
    Request(String),
    #[error("summarization backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed summary response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn summarize(&self, transcript: &str) -> Result<MeetingSummary, SummarizationError>;
}

/// Construct the configured summarizer.
pub fn build_summarizer(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    match config.provider.as_str() {
        "mock" => Ok(Box::new(MockSummarizer::new())),
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .context("api_key is required for the openai provider")?;
            Ok(Box::new(OpenAiSummarizer::new(
                api_key,
                config.api_endpoint.clone(),
                config.model.clone(),
            )))
        }
        other => bail!(
            "Unknown summarizer provider '{}'. Supported providers: mock, openai",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mock_summarizer() {
        let config = SummarizerConfig {
            provider: "mock".to_string(),
            ..Default::default()
        };
        let summarizer = build_summarizer(&config).unwrap();
        assert_eq!(summarizer.name(), "mock");
    }

    #[test]
    fn test_build_openai_requires_api_key() {
        let config = SummarizerConfig {
            provider: "openai".to_string(),
            api_key: None,
            ..Default::default()
        };
        assert!(build_summarizer(&config).is_err());
    }

    #[test]
    fn test_build_unknown_provider_fails() {
        let config = SummarizerConfig {
            provider: "nope".to_string(),
            ..Default::default()
        };
        assert!(build_summarizer(&config).is_err());
    }
}
