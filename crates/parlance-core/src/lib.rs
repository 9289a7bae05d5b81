//! Business logic and storage trait definitions for Parlance.
//!
//! This crate defines the "ports" that the infrastructure layer implements:
//! the `ConversationMemory` storage trait plus the `ChatClient` and
//! `SearchProvider` collaborator traits. It also holds the pure pieces of the
//! backend -- search-hit classification, the search payload encoder, title
//! derivation -- and the `ChatService` orchestration that ties them together.
//!
//! Depends only on `parlance-types` -- never on `parlance-infra` or any
//! filesystem/network crate.

pub mod catalog;
pub mod chat;
pub mod memory;
pub mod search;
