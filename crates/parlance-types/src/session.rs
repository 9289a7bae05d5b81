//! Session summary type.
//!
//! A `SessionSummary` is derived at listing time, never stored: the title is
//! resolved from the title index or the first user message, and the timestamp
//! is the session file's last-modification time.

use serde::{Deserialize, Serialize};

/// A derived view of one stored conversation, used for session listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Opaque session identifier (the session file's stem).
    pub id: String,
    /// Resolved display title: custom title, else derived from content.
    pub title: String,
    /// Last modification time of the session's file, in Unix milliseconds.
    ///
    /// Freshness is defined by write time, not message count; this always
    /// reflects durable state, even for sessions evicted from cache.
    pub last_modified_ms: i64,
}
