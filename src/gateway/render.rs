//! Response rendering and inbound text normalization.

use chrono::Local;
use uuid::Uuid;

use crate::kernel::record::IntentResult;

/// Generate a short correlation id for tracing logs and responses.
pub fn correlation_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..8].to_string()
}

/// Strip the bot's own mention markup and trim surrounding whitespace.
pub fn sanitise_text(raw_text: &str, bot_user_id: Option<&str>) -> String {
    match bot_user_id {
        Some(id) if !raw_text.is_empty() => raw_text
            .replace(&format!("<@{id}>"), "")
            .trim()
            .to_string(),
        _ => raw_text.trim().to_string(),
    }
}

pub fn format_bullet_list<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    items
        .into_iter()
        .map(|item| format!("\u{2022} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a result for the chat surface: status marker, message,
/// correlation id, and the recent-intents block when memory is non-empty.
/// Timestamps are shown as local time-of-day.
pub fn format_response(result: &IntentResult, correlation_id: &str) -> String {
    let memory_lines: Vec<String> = result
        .memory
        .iter()
        .map(|record| {
            format!(
                "{} {}: {}",
                record.timestamp.with_timezone(&Local).format("%H:%M:%S"),
                record.user_id,
                record.text
            )
        })
        .collect();

    let memory_block = if memory_lines.is_empty() {
        String::new()
    } else {
        format!("\nRecent intents:\n{}", format_bullet_list(memory_lines))
    };

    let status = if result.accepted { "\u{2705}" } else { "\u{26a0}\u{fe0f}" };
    format!(
        "{status} {}\n\u{2022} correlation_id={correlation_id}{memory_block}",
        result.message
    )
}
