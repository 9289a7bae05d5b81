//! Conversation memory implementations.

pub mod file;

pub use file::FileConversationMemory;
