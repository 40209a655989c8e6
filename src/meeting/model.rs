//! Meeting record types and the lifecycle status table.
//!
//! The JSON shape of [`Meeting`] is the interchange contract between the
//! store and every consumer (API clients, exporters), so field names follow
//! the dashboard's camelCase convention.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing stage of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Recording,
    Transcribing,
    Analyzing,
    Completed,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Transcribing => "transcribing",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
        }
    }

    /// Next stage in the fixed progression. `None` once completed.
    pub fn next(&self) -> Option<MeetingStatus> {
        match self {
            Self::Recording => Some(Self::Transcribing),
            Self::Transcribing => Some(Self::Analyzing),
            Self::Analyzing => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Completed meetings have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A single recorded/processed session tracked by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Duration in minutes.
    pub duration: u32,
    pub participants: Vec<String>,
    pub status: MeetingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MeetingSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Create a meeting with a fresh UUID and the given initial status.
    pub fn new(title: impl Into<String>, status: MeetingStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            date: now,
            duration: 0,
            participants: Vec::new(),
            status,
            progress: None,
            transcript: None,
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Refresh `updated_at`. If the clock did not advance between two
    /// mutations the timestamp is bumped by 1ns so it stays strictly
    /// increasing per meeting.
    pub(crate) fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }
}

/// Structured summary produced by the summarization collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<String>,
    pub next_steps: Vec<String>,
    pub attendees: Vec<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub task: String,
    pub assignee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub priority: Priority,
    pub status: ActionItemStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionItemStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}
