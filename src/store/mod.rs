//! Document store abstraction for patent-family search.
//!
//! The pipeline issues two request shapes against the store: an exact-match
//! family lookup and a kNN similarity search. Both are described by the
//! immutable [`SearchRequest`] value, so query construction is testable
//! without a live engine.
//!
//! Implementations:
//! - [`ElasticStore`]: HTTP client for an Elasticsearch cluster
//! - [`MemoryStore`]: evaluates the same queries over records held in memory

pub mod elastic;
pub mod memory;
pub mod query;

pub use elastic::ElasticStore;
pub use memory::MemoryStore;
pub use query::{BoolQuery, KnnClause, Query, SearchRequest};

use crate::types::PatentFamilyRecord;
use async_trait::async_trait;

/// Document store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search engine returned status {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("unexpected search response: {0}")]
    Decode(String),
    #[error("invalid store configuration: {0}")]
    Build(String),
    #[error("failed to load fixtures from {path}: {reason}")]
    Fixture { path: String, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait abstracting where patent families are searched.
///
/// Implementations must be safe to share across concurrent requests; the
/// service holds a single instance behind an `Arc`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute a search and return the matching records in ranked order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<PatentFamilyRecord>, StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Human-readable backend name for logging (e.g. "elasticsearch", "memory").
    fn backend_name(&self) -> &str;
}
