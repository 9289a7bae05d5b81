//! Search-result classification and payload encoding.
//!
//! `classifier` assigns each provider hit to one fixed category,
//! `encoder` serializes the grouped hits into the JSON payload streamed to
//! the client, and `provider` defines the port for the external search API.

pub mod classifier;
pub mod encoder;
pub mod provider;
