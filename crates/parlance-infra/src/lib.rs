//! Infrastructure layer for Parlance.
//!
//! Contains implementations of the storage traits defined in
//! `parlance-core`: file-backed conversation memory with a concurrent
//! in-process cache.

pub mod memory;
