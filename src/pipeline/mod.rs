//! Competitor-discovery pipeline
//!
//! company name → family lookup → mean embedding → kNN search → candidate
//! names → sentence.
//!
//! - `aggregator`    - element-wise mean of family embeddings
//! - `query_builder` - family lookup and kNN search requests
//! - `extractor`     - lead-member names from kNN hits
//! - `formatter`     - deduplicated natural-language sentence
//! - `state`         - stage tracking and the [`Outcome`] sum type
//! - `coordinator`   - [`CompetitorFinder`], which runs the sequence

pub mod aggregator;
pub mod coordinator;
pub mod extractor;
pub mod formatter;
pub mod query_builder;
pub mod state;

pub use aggregator::{aggregate, AggregateError};
pub use coordinator::{CompetitorFinder, PipelineError};
pub use extractor::extract_candidates;
pub use formatter::format_competitors;
pub use query_builder::{build_family_query, build_knn_query};
pub use state::{Outcome, PipelineStage, NO_EMBEDDINGS_DETAIL};
