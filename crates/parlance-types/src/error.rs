//! Error types for Parlance.
//!
//! Three tiers of failure, by severity:
//! - `MemoryError::Init` is fatal: the storage root cannot be created.
//! - `MemoryError::Persist`/`Serialize` must reach the caller of `append` --
//!   silently dropping a message corrupts the conversation.
//! - Title index I/O is best-effort: failures are logged at warn level and
//!   swallowed by the store, never surfaced. Titles are cosmetic.

use thiserror::Error;

/// Errors from conversation storage operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("cannot initialize conversation storage at '{path}': {source}")]
    Init {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist history for session '{session_id}': {source}")]
    Persist {
        session_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history for session '{session_id}': {source}")]
    Serialize {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors reported by the search provider collaborator.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search provider error: {0}")]
    Provider(String),
}

/// Errors surfaced on a chat stream.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("llm provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_error_display() {
        let err = MemoryError::Persist {
            session_id: "s1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("s1"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_chat_error_from_search() {
        let err: ChatError = SearchError::Provider("timeout".to_string()).into();
        assert!(err.to_string().contains("timeout"));
    }
}
