//! `recap export` — render a meeting JSON record into a document.

use anyhow::{Context, Result};
use tracing::info;

use super::args::ExportCliArgs;
use crate::export::export_meeting;
use crate::meeting::Meeting;

pub fn handle_export_command(args: ExportCliArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;

    let meeting: Meeting =
        serde_json::from_str(&content).context("Input is not a valid meeting record")?;

    let artifact = export_meeting(&meeting, args.format)?;

    let output = args
        .output
        .unwrap_or_else(|| artifact.file_name.clone().into());
    std::fs::write(&output, &artifact.bytes)
        .with_context(|| format!("Failed to write {:?}", output))?;

    info!("Exported meeting {} to {:?}", meeting.id, output);
    println!("{}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use crate::meeting::MeetingStatus;

    #[test]
    fn test_export_command_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let meeting = Meeting::new("CLI export test", MeetingStatus::Completed);

        let input = dir.path().join("meeting.json");
        std::fs::write(&input, serde_json::to_string(&meeting).unwrap()).unwrap();
        let output = dir.path().join("out.json");

        handle_export_command(ExportCliArgs {
            input,
            format: ExportFormat::Json,
            output: Some(output.clone()),
        })
        .unwrap();

        let exported: Meeting =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(exported.id, meeting.id);
    }

    #[test]
    fn test_export_command_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("not-a-meeting.json");
        std::fs::write(&input, "{\"nope\": true}").unwrap();

        let result = handle_export_command(ExportCliArgs {
            input,
            format: ExportFormat::Json,
            output: None,
        });
        assert!(result.is_err());
    }
}
