use chrono::{DateTime, SecondsFormat, Utc};

use crate::convert::OutputFormat;

const FALLBACK_TITLE: &str = "download";
const TIMESTAMP_LEN: usize = 19;

/// `{sanitized_title}_{timestamp}.{ext}`, e.g. `Chat_2024-05-01T12-34-56.md`.
pub fn download_filename(title: &str, now: DateTime<Utc>, format: OutputFormat) -> String {
    format!(
        "{}_{}.{}",
        sanitize_title(title),
        format_timestamp(now),
        format.extension()
    )
}

/// Replaces path-forbidden characters with `_`; an empty title becomes `download`.
pub fn sanitize_title(input: &str) -> String {
    if input.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

/// ISO-8601 UTC instant with `:` and `.` replaced by `-`, cut to seconds.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .map(|c| if matches!(c, ':' | '.') { '-' } else { c })
        .take(TIMESTAMP_LEN)
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
