//! ConversationMemory trait definition.
//!
//! The durable per-session message store. Implementations live in
//! `parlance-infra` (e.g., `FileConversationMemory`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parlance_types::error::MemoryError;
use parlance_types::message::ChatMessage;
use parlance_types::session::SessionSummary;

/// Trait for durable conversation storage with an optional per-session title.
///
/// Contract highlights:
/// - `append` is the only fallible read-modify-write; implementations must
///   serialize concurrent appends to the *same* session id (no lost updates)
///   while letting distinct sessions proceed in parallel.
/// - `read` and `clear` never fail: an absent or unreadable session reads as
///   empty, and deleting a non-existent session is a no-op.
/// - Title mutations persist the title index immediately, best-effort.
pub trait ConversationMemory: Send + Sync {
    /// Append messages to a session, creating it on first use, and persist
    /// the full updated history.
    fn append(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;

    /// Read a session's history. `limit == 0` returns everything; otherwise
    /// exactly the last `limit` messages in original order.
    fn read(
        &self,
        session_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Vec<ChatMessage>> + Send;

    /// Remove the session's cache entry, custom title, and durable file.
    fn clear(&self, session_id: &str) -> impl std::future::Future<Output = ()> + Send;

    /// Set the session's custom title and persist the title index.
    fn set_title(
        &self,
        session_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = ()> + Send;

    /// Read the session's custom title, if one was set.
    fn title(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Option<String>> + Send;

    /// Enumerate all stored sessions, most recently modified first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Vec<SessionSummary>> + Send;
}
