//! Console output formatter for Ganesha replies

use colored::Colorize;
use ganesha_application::RespondOutput;
use ganesha_domain::{GaneshResponse, Role, SessionHistory, Stage, single_line, truncate};
use serde_json::Value;

/// Longest user or agent line shown by [`ConsoleFormatter::format_history`]
const HISTORY_PREVIEW_CHARS: usize = 120;

/// Formats Ganesha replies for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a reply as blessing, answer, blessing.
    ///
    /// Refusals carry a dimmed note with the recorded reason.
    pub fn format(response: &GaneshResponse) -> String {
        let mut output = String::new();

        if !response.blessing_open.trim().is_empty() {
            output.push_str(&format!("{}\n\n", response.blessing_open.yellow().italic()));
        }

        output.push_str(&response.answer);
        output.push('\n');

        if !response.blessing_close.trim().is_empty() {
            output.push_str(&format!("\n{}\n", response.blessing_close.yellow().italic()));
        }

        if response.refusal
            && let Some(reason) = &response.refusal_reason
        {
            output.push_str(&format!("\n{}\n", format!("({})", reason).dimmed()));
        }

        output
    }

    /// Format a reply followed by the stage it ended in
    pub fn format_output(output: &RespondOutput) -> String {
        let mut text = Self::format(&output.response);
        text.push_str(&format!(
            "{} {}\n",
            "--".dimmed(),
            Self::stage_label(output.stage)
        ));
        text
    }

    /// Format as JSON, the same shape sent over the wire
    pub fn format_json(response: &GaneshResponse) -> String {
        serde_json::to_string_pretty(&Value::Object(response.to_transport_dict()))
            .unwrap_or_else(|_| response.to_json_string())
    }

    /// Format a session history, one line per turn
    pub fn format_history(history: &SessionHistory) -> String {
        if history.is_empty() {
            return format!("{}\n", "No messages yet.".dimmed());
        }

        let mut output = format!(
            "{} ({} exchanges)\n",
            "History".cyan().bold(),
            history.exchange_count()
        );
        for turn in history.turns() {
            let label = match turn.role() {
                Role::User => format!("{}:", turn.role().label()).green().bold(),
                Role::Agent => format!("{}:", turn.role().label()).yellow().bold(),
            };
            let content = match turn.role() {
                Role::User => turn.content().to_string(),
                Role::Agent => Self::stored_answer(turn.content()),
            };
            output.push_str(&format!(
                "  {} {}\n",
                label,
                truncate(&single_line(&content), HISTORY_PREVIEW_CHARS)
            ));
        }
        output
    }

    fn stage_label(stage: Stage) -> colored::ColoredString {
        match stage {
            Stage::Parsed => stage.display_name().green(),
            Stage::Rejected => stage.display_name().yellow(),
            Stage::GenerationFailed => stage.display_name().red(),
            _ => stage.display_name().normal(),
        }
    }

    /// Agent turns are stored as the transport JSON; show only the answer
    fn stored_answer(content: &str) -> String {
        serde_json::from_str::<Value>(content)
            .ok()
            .and_then(|v| v.get("answer").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganesha_domain::Language;

    fn sample() -> GaneshResponse {
        GaneshResponse::new_answer(
            Language::English,
            "Om Gan Ganapataye Namah",
            "The mouse carries me over every obstacle.",
            "May your path be clear.",
        )
    }

    #[test]
    fn test_format_includes_all_parts() {
        let text = ConsoleFormatter::format(&sample());
        assert!(text.contains("Om Gan Ganapataye Namah"));
        assert!(text.contains("The mouse carries me over every obstacle."));
        assert!(text.contains("May your path be clear."));
    }

    #[test]
    fn test_format_refusal_shows_reason() {
        let text = ConsoleFormatter::format(&GaneshResponse::router_rejection());
        assert!(text.contains("matters of the spirit"));
        assert!(text.contains("Inappropriate topic classified by router"));
    }

    #[test]
    fn test_format_json_is_transport_dict() {
        let json = ConsoleFormatter::format_json(&sample());
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lang"], "en");
        assert_eq!(value["refusal"], false);
        assert_eq!(value["refusal_reason"], "");
        assert_eq!(value["answer"], "The mouse carries me over every obstacle.");
    }

    #[test]
    fn test_format_output_names_stage() {
        let output = RespondOutput {
            response: GaneshResponse::generation_failure("timed out"),
            stage: Stage::GenerationFailed,
        };
        let text = ConsoleFormatter::format_output(&output);
        assert!(text.contains(Stage::GenerationFailed.display_name()));
    }

    #[test]
    fn test_format_history_shows_answers_not_json() {
        let mut history = SessionHistory::new();
        history.push_exchange("Why a mouse?", &sample());

        let text = ConsoleFormatter::format_history(&history);
        assert!(text.contains("1 exchanges"));
        assert!(text.contains("Why a mouse?"));
        assert!(text.contains("The mouse carries me over every obstacle."));
        assert!(!text.contains("blessing_open"));
    }

    #[test]
    fn test_format_empty_history() {
        let text = ConsoleFormatter::format_history(&SessionHistory::new());
        assert!(text.contains("No messages yet."));
    }
}
