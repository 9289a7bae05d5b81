//! Search payload encoder.
//!
//! Serializes classified search results into the single JSON object the web
//! client parses out of the chat stream. The payload shape is owned here and
//! built by hand so that every user-controlled string -- query, titles, urls,
//! snippets -- provably passes through `escape_into` before embedding.
//! Failure to escape any of backslash, quote, newline, carriage return, or
//! tab is a correctness defect: the payload is machine-parsed downstream.

use chrono::Local;
use parlance_types::search::ClassifiedGroup;

/// Maximum snippet length in characters before truncation.
const SNIPPET_MAX_CHARS: usize = 150;

/// Encode a search outcome as the client-facing JSON payload.
///
/// `total` is the provider's hit count; an empty `groups` slice encodes as
/// `"categories":[]` -- empty input is never an error.
pub fn encode_search_payload(
    status: &str,
    query: &str,
    total: usize,
    groups: &[ClassifiedGroup],
) -> String {
    let time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    encode_with_time(status, query, total, groups, &time)
}

fn encode_with_time(
    status: &str,
    query: &str,
    total: usize,
    groups: &[ClassifiedGroup],
    time: &str,
) -> String {
    let mut out = String::from("{\"type\":\"search\",");

    out.push_str("\"query\":\"");
    escape_into(&mut out, query);
    out.push_str("\",");

    out.push_str("\"time\":\"");
    escape_into(&mut out, time);
    out.push_str("\",");

    out.push_str("\"total\":");
    out.push_str(&total.to_string());
    out.push(',');

    out.push_str("\"status\":\"");
    escape_into(&mut out, status);
    out.push_str("\",");

    out.push_str("\"categories\":[");
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str("{\"name\":\"");
        escape_into(&mut out, group.category.label());
        out.push_str("\",\"items\":[");

        for (j, hit) in group.hits.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push_str("{\"title\":\"");
            escape_into(&mut out, &hit.title);
            out.push_str("\",\"url\":\"");
            escape_into(&mut out, &hit.url);
            out.push_str("\",\"snippet\":\"");
            let snippet = truncate_snippet(hit.text.as_deref().unwrap_or(""));
            escape_into(&mut out, &snippet);
            out.push_str("\"}");
        }
        out.push_str("]}");
    }
    out.push_str("]}");

    out
}

/// Truncate a snippet to `SNIPPET_MAX_CHARS` characters, appending an
/// ellipsis when longer. Truncation happens before escaping.
fn truncate_snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_MAX_CHARS {
        let truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Append `s` to `out` with JSON string escaping for the five characters
/// that break the payload: backslash, quote, newline, carriage return, tab.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}
