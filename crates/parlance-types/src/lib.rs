//! Shared domain types for Parlance.
//!
//! This crate contains the core domain types used across the Parlance backend:
//! chat messages, session summaries, search hits and categories, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod error;
pub mod llm;
pub mod message;
pub mod search;
pub mod session;
