//! Request type for the LLM chat collaborator.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// A completion request sent to a `ChatClient` implementation.
///
/// The backend owns prompt assembly; providers only see the finished
/// system prompt and message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// System prompt, if any.
    pub system: Option<String>,
    /// Conversation messages in timeline order, ending with the user turn.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Build a request from a system prompt and message list.
    pub fn new(system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            system: Some(system.into()),
            messages,
        }
    }
}
