//! Deterministic placeholder summary.
//!
//! When the summarization provider is down or errors, the pipeline still
//! has to carry a meeting to `completed`. This extracts what it can from
//! the transcript with plain keyword heuristics — same input, same output.

use regex::Regex;
use std::sync::OnceLock;

use crate::meeting::{ActionItem, ActionItemStatus, MeetingSummary, Priority, Sentiment};

const MAX_KEY_POINTS: usize = 4;
const MAX_ACTION_ITEMS: usize = 5;

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(action|task|todo|follow.?up|need to|should|will)\b").unwrap()
    })
}

fn decision_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(decided|agreed|approved|resolved)\b").unwrap())
}

fn next_step_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(next step|schedule|plan to|prepare)\b").unwrap())
}

fn speaker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Name:" or "Name Surname:" at the start of a sentence or line
    RE.get_or_init(|| Regex::new(r"(?m)(?:^|\. )([A-Z][a-z]+(?: [A-Z][a-z]+)?):").unwrap())
}

/// Build a summary from the transcript alone.
pub fn fallback_summary(transcript: &str) -> MeetingSummary {
    let sentences: Vec<&str> = transcript
        .split(['.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let key_points: Vec<String> = sentences
        .iter()
        .take(MAX_KEY_POINTS)
        .map(|s| s.to_string())
        .collect();

    let action_items: Vec<ActionItem> = sentences
        .iter()
        .filter(|s| action_re().is_match(s))
        .take(MAX_ACTION_ITEMS)
        .enumerate()
        .map(|(i, s)| ActionItem {
            id: format!("action-{}", i),
            task: strip_speaker(s),
            assignee: "Unassigned".to_string(),
            deadline: None,
            priority: Priority::Medium,
            status: ActionItemStatus::Pending,
        })
        .collect();

    let decisions: Vec<String> = sentences
        .iter()
        .filter(|s| decision_re().is_match(s))
        .map(|s| strip_speaker(s))
        .collect();

    let next_steps: Vec<String> = sentences
        .iter()
        .filter(|s| next_step_re().is_match(s))
        .map(|s| strip_speaker(s))
        .collect();

    let mut attendees = Vec::new();
    for capture in speaker_re().captures_iter(transcript) {
        let name = capture[1].to_string();
        if !attendees.contains(&name) {
            attendees.push(name);
        }
    }

    MeetingSummary {
        key_points,
        action_items,
        decisions,
        next_steps,
        attendees,
        topics: Vec::new(),
        sentiment: Sentiment::Neutral,
    }
}

fn strip_speaker(sentence: &str) -> String {
    match sentence.split_once(": ") {
        Some((prefix, rest)) if prefix.split_whitespace().count() <= 2 => rest.to_string(),
        _ => sentence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "John: We need to update the project timeline. \
Sarah: Agreed, we decided to postpone feature X. \
We should schedule a follow-up meeting with stakeholders. \
The release went well overall.";

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_summary(TRANSCRIPT);
        let b = fallback_summary(TRANSCRIPT);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_extracts_action_items() {
        let summary = fallback_summary(TRANSCRIPT);
        assert!(!summary.action_items.is_empty());
        assert!(summary
            .action_items
            .iter()
            .any(|item| item.task.contains("update the project timeline")));
        assert!(summary
            .action_items
            .iter()
            .all(|item| item.status == ActionItemStatus::Pending));
    }

    #[test]
    fn test_extracts_decisions_and_next_steps() {
        let summary = fallback_summary(TRANSCRIPT);
        assert!(summary.decisions.iter().any(|d| d.contains("postpone")));
        assert!(summary
            .next_steps
            .iter()
            .any(|s| s.contains("schedule a follow-up")));
    }

    #[test]
    fn test_detects_speakers_as_attendees() {
        let summary = fallback_summary(TRANSCRIPT);
        assert_eq!(summary.attendees, vec!["John", "Sarah"]);
    }

    #[test]
    fn test_sentiment_defaults_neutral() {
        let summary = fallback_summary(TRANSCRIPT);
        assert_eq!(summary.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_empty_transcript_yields_empty_summary() {
        let summary = fallback_summary("");
        assert!(summary.key_points.is_empty());
        assert!(summary.action_items.is_empty());
        assert!(summary.attendees.is_empty());
    }

    #[test]
    fn test_key_points_capped() {
        let long: String = (0..20)
            .map(|i| format!("Point number {} was raised. ", i))
            .collect();
        let summary = fallback_summary(&long);
        assert_eq!(summary.key_points.len(), MAX_KEY_POINTS);
    }
}
