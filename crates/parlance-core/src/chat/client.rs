//! ChatClient trait definition.
//!
//! Port for the streaming LLM backend. Uses RPITIT for `complete` and
//! `Pin<Box<dyn Stream>>` for `stream` (streams need to be object-safe so
//! the service can hand them through unchanged).
//!
//! Implementations live outside this crate; the core treats the model as an
//! external collaborator that turns a finished prompt into text chunks.

use std::pin::Pin;

use futures_util::Stream;

use parlance_types::error::ChatError;
use parlance_types::llm::ChatRequest;

/// A boxed stream of reply text chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send + 'static>>;

/// Trait for streaming LLM chat backends.
pub trait ChatClient: Send + Sync {
    /// Human-readable backend name (e.g., "anthropic", "openai").
    fn name(&self) -> &str;

    /// Send a request and receive the full reply text.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String, ChatError>> + Send;

    /// Send a request and receive the reply as a stream of text chunks.
    fn stream(&self, request: ChatRequest) -> ChunkStream;
}
