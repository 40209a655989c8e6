//! Export collaborator.
//!
//! Renders a meeting into a downloadable artifact. Exporting never mutates
//! the store; failures are reported to the caller and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod pdf;

use crate::meeting::Meeting;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (expected pdf, word or json)")]
    UnknownFormat(String),
    #[error("failed to serialize meeting")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Word,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            // The "Word" export is an HTML document, the de facto portable
            // format the dashboard produced for Word users.
            Self::Word => "html",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => "text/html; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "word" => Ok(Self::Word),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered export, ready to download or write to disk.
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `meeting` into the requested format.
pub fn export_meeting(meeting: &Meeting, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Json => serde_json::to_vec_pretty(meeting)?,
        ExportFormat::Word => render_html(meeting).into_bytes(),
        ExportFormat::Pdf => pdf::render(&report_lines(meeting)),
    };

    Ok(ExportArtifact {
        file_name: format!("meeting-{}.{}", meeting.id, format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}

/// Shared plain-text layout used by the PDF export.
fn report_lines(meeting: &Meeting) -> Vec<String> {
    let mut lines = vec![
        "Meeting Summary".to_string(),
        String::new(),
        format!("Meeting: {}", meeting.title),
        format!("Date: {}", meeting.date.format("%Y-%m-%d")),
        format!("Duration: {} minutes", meeting.duration),
        String::new(),
    ];

    if let Some(summary) = &meeting.summary {
        lines.push("Key Points:".to_string());
        for (i, point) in summary.key_points.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, point));
        }
        lines.push(String::new());

        lines.push("Action Items:".to_string());
        for (i, item) in summary.action_items.iter().enumerate() {
            lines.push(format!(
                "{}. {} - {} ({} priority)",
                i + 1,
                item.task,
                item.assignee,
                item.priority.as_str()
            ));
        }
        lines.push(String::new());

        lines.push("Decisions:".to_string());
        for decision in &summary.decisions {
            lines.push(format!("- {}", decision));
        }
        lines.push(String::new());

        lines.push("Next Steps:".to_string());
        for step in &summary.next_steps {
            lines.push(format!("- {}", step));
        }
    }

    lines
}

fn render_html(meeting: &Meeting) -> String {
    let mut html = format!(
        "<html>\n<head>\n<title>Meeting Summary - {title}</title>\n<style>\n\
         body {{ font-family: Arial, sans-serif; margin: 40px; }}\n\
         h1 {{ color: #1e40af; }}\n\
         h2 {{ color: #374151; margin-top: 30px; }}\n\
         .action-item {{ margin: 10px 0; padding: 10px; background-color: #f3f4f6; }}\n\
         </style>\n</head>\n<body>\n<h1>Meeting Summary</h1>\n\
         <div class=\"info\">\n<strong>Meeting:</strong> {title}<br>\n\
         <strong>Date:</strong> {date}<br>\n\
         <strong>Duration:</strong> {duration} minutes\n</div>\n",
        title = escape_html(&meeting.title),
        date = meeting.date.format("%Y-%m-%d"),
        duration = meeting.duration,
    );

    if let Some(summary) = &meeting.summary {
        html.push_str("<h2>Key Points</h2>\n<ul>\n");
        for point in &summary.key_points {
            html.push_str(&format!("<li>{}</li>\n", escape_html(point)));
        }
        html.push_str("</ul>\n<h2>Action Items</h2>\n");
        for item in &summary.action_items {
            html.push_str(&format!(
                "<div class=\"action-item\"><strong>{}</strong><br>Assignee: {} | Priority: {}{}</div>\n",
                escape_html(&item.task),
                escape_html(&item.assignee),
                item.priority.as_str(),
                item.deadline
                    .as_deref()
                    .map(|d| format!(" | Deadline: {}", escape_html(d)))
                    .unwrap_or_default(),
            ));
        }
        html.push_str("<h2>Decisions Made</h2>\n<ul>\n");
        for decision in &summary.decisions {
            html.push_str(&format!("<li>{}</li>\n", escape_html(decision)));
        }
        html.push_str("</ul>\n<h2>Next Steps</h2>\n<ul>\n");
        for step in &summary.next_steps {
            html.push_str(&format!("<li>{}</li>\n", escape_html(step)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::meeting::MeetingStatus;

    fn completed_meeting() -> Meeting {
        demo::demo_meetings().remove(0)
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for format in [ExportFormat::Pdf, ExportFormat::Word, ExportFormat::Json] {
            assert_eq!(format.as_str().parse::<ExportFormat>().unwrap(), format);
        }
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_json_export_carries_full_record() {
        let meeting = completed_meeting();
        let artifact = export_meeting(&meeting, ExportFormat::Json).unwrap();

        assert_eq!(artifact.content_type, "application/json");
        let parsed: Meeting = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(parsed.id, meeting.id);
        assert_eq!(parsed.status, MeetingStatus::Completed);
        assert!(parsed.summary.is_some());
    }

    #[test]
    fn test_word_export_is_html_document() {
        let meeting = completed_meeting();
        let artifact = export_meeting(&meeting, ExportFormat::Word).unwrap();

        let html = String::from_utf8(artifact.bytes).unwrap();
        assert!(html.starts_with("<html>"));
        assert!(html.contains(&meeting.title));
        assert!(html.contains("Key Points"));
        assert!(artifact.file_name.ends_with(".html"));
    }

    #[test]
    fn test_word_export_escapes_markup() {
        let mut meeting = completed_meeting();
        meeting.title = "Budget <review> & sync".to_string();
        let artifact = export_meeting(&meeting, ExportFormat::Word).unwrap();

        let html = String::from_utf8(artifact.bytes).unwrap();
        assert!(html.contains("Budget &lt;review&gt; &amp; sync"));
        assert!(!html.contains("<review>"));
    }

    #[test]
    fn test_pdf_export_has_document_skeleton() {
        let meeting = completed_meeting();
        let artifact = export_meeting(&meeting, ExportFormat::Pdf).unwrap();

        assert_eq!(artifact.content_type, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-1.4"));
        assert!(artifact.bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_report_lines_without_summary() {
        let meeting = Meeting::new("Quick sync", MeetingStatus::Recording);
        let lines = report_lines(&meeting);
        assert!(lines.iter().any(|l| l.contains("Quick sync")));
        assert!(!lines.iter().any(|l| l.contains("Key Points")));
    }
}
