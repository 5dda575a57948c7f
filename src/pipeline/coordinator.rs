//! Competitor lookup coordinator
//!
//! Sequences the two store calls with aggregation, extraction and
//! formatting. Each call of [`CompetitorFinder::find_competitors`] is an
//! independent, stateless run; the only shared resource is the store.

use super::aggregator::{aggregate, AggregateError};
use super::extractor::extract_candidates;
use super::formatter::format_competitors;
use super::query_builder::{build_family_query, build_knn_query};
use super::state::{Outcome, PipelineStage};
use crate::config::SearchConfig;
use crate::store::{DocumentStore, StoreError};
use crate::types::PatentFamilyRecord;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Errors that end a lookup in [`Outcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Runs competitor lookups against a shared document store.
pub struct CompetitorFinder {
    store: Arc<dyn DocumentStore>,
    search: SearchConfig,
}

impl CompetitorFinder {
    pub fn new(store: Arc<dyn DocumentStore>, search: SearchConfig) -> Self {
        Self { store, search }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub const fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Exact-match family lookup for `company`.
    pub async fn fetch_families(&self, company: &str) -> Result<Vec<PatentFamilyRecord>, StoreError> {
        self.store
            .search(&build_family_query(company, &self.search))
            .await
    }

    /// Run the full lookup. Never fails: errors are folded into the outcome.
    pub async fn find_competitors(&self, company: &str) -> Outcome {
        let mut stage = PipelineStage::Start;
        match self.run(company, &mut stage).await {
            Ok(Some(sentence)) => Outcome::Competitors(sentence),
            Ok(None) => {
                info!(company = %company, "No embedded families, skipping kNN search");
                Outcome::NoSignal
            }
            Err(e) => {
                warn!(company = %company, stage = %stage, error = %e, "Competitor lookup failed");
                Outcome::Failed {
                    stage,
                    message: e.to_string(),
                }
            }
        }
    }

    async fn run(
        &self,
        company: &str,
        stage: &mut PipelineStage,
    ) -> Result<Option<String>, PipelineError> {
        let families = self.fetch_families(company).await?;
        advance(stage, PipelineStage::PatentsFetched, company);
        debug!(company = %company, families = families.len(), "Families fetched");

        let Some(vector) = aggregate(&families)? else {
            return Ok(None);
        };
        advance(stage, PipelineStage::EmbeddingComputed, company);

        let request = build_knn_query(&vector, company, &self.search);
        let hits = self.store.search(&request).await?;
        advance(stage, PipelineStage::KnnExecuted, company);
        debug!(company = %company, hits = hits.len(), "kNN search returned");

        let candidates = extract_candidates(&hits);
        advance(stage, PipelineStage::CompetitorsExtracted, company);

        let sentence = format_competitors(&candidates, company);
        advance(stage, PipelineStage::Formatted, company);
        info!(company = %company, candidates = candidates.len(), "Competitor lookup complete");

        Ok(Some(sentence))
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage, company: &str) {
    debug!(company = %company, from = %stage, to = %next, "Pipeline stage transition");
    *stage = next;
}
