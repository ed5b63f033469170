use std::time::Duration;

use serde_json::Value;

use crate::types::VideoMetadata;

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 59.95 {
        format!("{:.1}s", secs)
    } else {
        let total = secs.round() as u64;
        format!("{}m {}s", total / 60, total % 60)
    }
}

/// One `key: value` line per metadata field, strings unquoted
pub fn format_metadata_readable(metadata: &VideoMetadata) -> String {
    metadata
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}: {s}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `max_words` words of `text`, with an ellipsis when cut
pub fn preview(text: &str, max_words: usize) -> String {
    let mut words = text.split_whitespace();
    let head: Vec<&str> = words.by_ref().take(max_words).collect();
    let mut out = head.join(" ");
    if words.next().is_some() {
        out.push_str(" …");
    }
    out
}
