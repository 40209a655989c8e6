//! Demo data for the dashboard.
//!
//! Seeds the store with plausible meetings so the UI has something to show
//! before any real recording happens, and generates the meetings the
//! simulator spawns while running.

use chrono::{Duration, Utc};

use crate::meeting::{
    ActionItem, ActionItemStatus, Meeting, MeetingStatus, MeetingSummary, Priority, Sentiment,
};

/// Seed collection: one fully processed meeting and one mid-pipeline,
/// newest first.
pub fn demo_meetings() -> Vec<Meeting> {
    let now = Utc::now();

    let mut planning = Meeting::new("Q4 Product Planning Meeting", MeetingStatus::Completed)
        .with_duration(45)
        .with_participants(vec![
            "John Smith".to_string(),
            "Sarah Johnson".to_string(),
            "Mike Chen".to_string(),
        ])
        .with_transcript("Sample transcript content...");
    planning.date = now - Duration::days(2);
    planning.created_at = planning.date;
    planning.updated_at = planning.date + Duration::minutes(45);
    planning.summary = Some(MeetingSummary {
        key_points: vec![
            "Discussed Q4 product roadmap and feature prioritization".to_string(),
            "Reviewed current sprint progress and identified blockers".to_string(),
            "Analyzed user feedback from recent feature release".to_string(),
        ],
        action_items: vec![
            ActionItem {
                id: "1".to_string(),
                task: "Update project timeline based on new requirements".to_string(),
                assignee: "John Smith".to_string(),
                deadline: Some((now + Duration::days(7)).format("%Y-%m-%d").to_string()),
                priority: Priority::High,
                status: ActionItemStatus::Pending,
            },
            ActionItem {
                id: "2".to_string(),
                task: "Prepare user research findings presentation".to_string(),
                assignee: "Sarah Johnson".to_string(),
                deadline: Some((now + Duration::days(4)).format("%Y-%m-%d").to_string()),
                priority: Priority::Medium,
                status: ActionItemStatus::Pending,
            },
        ],
        decisions: vec![
            "Approved budget increase for Q1 marketing initiatives".to_string(),
            "Decided to postpone feature X to next quarter".to_string(),
        ],
        next_steps: vec![
            "Schedule follow-up meeting with stakeholders".to_string(),
            "Prepare detailed project proposal".to_string(),
        ],
        attendees: vec![
            "John Smith".to_string(),
            "Sarah Johnson".to_string(),
            "Mike Chen".to_string(),
        ],
        topics: vec![
            "Product Roadmap".to_string(),
            "Sprint Planning".to_string(),
            "User Feedback".to_string(),
        ],
        sentiment: Sentiment::Positive,
    });

    let mut standup = Meeting::new("Weekly Team Standup", MeetingStatus::Transcribing)
        .with_duration(30)
        .with_participants(vec![
            "Alice Brown".to_string(),
            "Bob Wilson".to_string(),
            "Carol Davis".to_string(),
        ]);
    standup.date = now - Duration::days(5);
    standup.created_at = standup.date;
    standup.updated_at = standup.date + Duration::minutes(30);

    vec![planning, standup]
}

/// Meeting inserted by the simulator's spawn path.
pub fn generated_meeting(sequence: u32) -> Meeting {
    // Deterministic-ish duration so spawned meetings don't all look alike
    let duration = 15 + (sequence * 7) % 45;
    Meeting::new(
        format!("Auto-generated Meeting {}", sequence),
        MeetingStatus::Recording,
    )
    .with_duration(duration)
    .with_participants(vec!["AI Assistant".to_string(), "Demo User".to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_meetings_shape() {
        let meetings = demo_meetings();
        assert_eq!(meetings.len(), 2);

        let completed = &meetings[0];
        assert_eq!(completed.status, MeetingStatus::Completed);
        assert!(completed.summary.is_some());
        assert!(completed.transcript.is_some());

        let in_flight = &meetings[1];
        assert_eq!(in_flight.status, MeetingStatus::Transcribing);
        assert!(in_flight.summary.is_none());
    }

    #[test]
    fn test_demo_ids_are_distinct() {
        let meetings = demo_meetings();
        assert_ne!(meetings[0].id, meetings[1].id);
    }

    #[test]
    fn test_generated_meeting_starts_recording() {
        let meeting = generated_meeting(3);
        assert_eq!(meeting.status, MeetingStatus::Recording);
        assert!(meeting.title.contains('3'));
        assert!(meeting.duration >= 15);
    }
}
