//! Competitor Scout: competitor discovery over patent-family embeddings
//!
//! Given a company name, finds the companies holding semantically similar
//! patent portfolios.
//!
//! ## Architecture
//!
//! - **Store**: search abstraction over the family index (Elasticsearch or in-memory)
//! - **Pipeline**: embedding aggregation, kNN retrieval, name extraction and formatting
//! - **API**: Axum endpoints mapping pipeline outcomes to `{"detail": ...}` responses
//! - **Config**: TOML + environment configuration for server, store and search sizing

pub mod api;
pub mod config;
pub mod pipeline;
pub mod store;
pub mod types;

pub use config::ServiceConfig;

pub use types::{CandidateName, FamilySummary, Member, Name, PatentFamilyRecord};

pub use store::{DocumentStore, ElasticStore, MemoryStore, SearchRequest, StoreError};

pub use pipeline::{CompetitorFinder, Outcome, PipelineStage};

pub use api::{create_app, ServiceState};
