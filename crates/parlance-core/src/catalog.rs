//! Display title resolution for session listings.
//!
//! A session's listed title is its custom title when one is set and
//! non-blank; otherwise it is derived from the first user message. Messages
//! written by the search path embed the original question behind a preamble
//! marker, so derivation strips everything up to the last marker occurrence
//! before truncating.

use parlance_types::message::{ChatMessage, MessageRole};

/// Marker that precedes the user's original question inside a
/// search-context prompt.
pub const SEARCH_QUESTION_MARKER: &str = "用户问题：";

/// Placeholder title for sessions with no user message.
pub const DEFAULT_TITLE: &str = "新对话";

/// Maximum derived title length, in characters.
const TITLE_MAX_CHARS: usize = 30;

/// Resolve a session's display title from its custom title and history.
pub fn resolve_title(custom: Option<&str>, messages: &[ChatMessage]) -> String {
    match custom {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => derive_title(messages),
    }
}

/// Derive a title from the first user message, or fall back to the
/// placeholder when the session has none.
pub fn derive_title(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find(|m| m.role == MessageRole::User)
        .map(|m| {
            let content = strip_search_preamble(&m.content);
            truncate_chars(content, TITLE_MAX_CHARS)
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Take the substring after the last marker occurrence, trimmed. Content
/// without the marker passes through untouched.
fn strip_search_preamble(content: &str) -> &str {
    match content.rfind(SEARCH_QUESTION_MARKER) {
        Some(idx) => content[idx + SEARCH_QUESTION_MARKER.len()..].trim(),
        None => content.trim(),
    }
}

/// Truncate to `max` characters with an ellipsis suffix when longer.
///
/// Counts chars, not bytes -- titles are routinely CJK.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let truncated: String = s.chars().take(max).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}
