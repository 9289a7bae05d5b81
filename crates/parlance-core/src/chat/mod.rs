//! Chat orchestration.
//!
//! `client` defines the port for the streaming LLM backend; `service` wires
//! conversation memory, search, and the client into streamed replies.

pub mod client;
pub mod service;
