//! SearchProvider trait definition.
//!
//! Port for the external web-search API. The network transport lives outside
//! this crate; the core only consumes already-fetched hits.

use parlance_types::error::SearchError;
use parlance_types::search::SearchHit;

/// Trait for web-search backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// An empty hit list is a valid result, not an error.
pub trait SearchProvider: Send + Sync {
    /// Run a search and return the provider's hits in rank order.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, SearchError>> + Send;
}
