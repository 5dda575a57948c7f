//! Pipeline stages and terminal outcomes
//!
//! A competitor lookup walks a short linear state machine:
//!
//! ```text
//! Start -> PatentsFetched -> EmbeddingComputed -> KnnExecuted
//!       -> CompetitorsExtracted -> Formatted
//! ```
//!
//! `PatentsFetched` may end early in [`Outcome::NoSignal`] when no family
//! carries an embedding; any error ends in [`Outcome::Failed`] tagged with
//! the last stage reached.

use std::fmt;

/// Detail reported when the company has no embedded family.
pub const NO_EMBEDDINGS_DETAIL: &str = "No embeddings found for the given company.";

/// Progress of a single competitor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    PatentsFetched,
    EmbeddingComputed,
    KnnExecuted,
    CompetitorsExtracted,
    Formatted,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::PatentsFetched => "patents_fetched",
            Self::EmbeddingComputed => "embedding_computed",
            Self::KnnExecuted => "knn_executed",
            Self::CompetitorsExtracted => "competitors_extracted",
            Self::Formatted => "formatted",
        };
        f.write_str(s)
    }
}

/// Terminal result of a competitor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Formatted competitor sentence (possibly the "no competitors" shape)
    Competitors(String),
    /// The company has no family with an embedding
    NoSignal,
    /// A store call or the aggregation failed
    Failed { stage: PipelineStage, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_is_snake_case() {
        let names: Vec<String> = [
            PipelineStage::Start,
            PipelineStage::PatentsFetched,
            PipelineStage::EmbeddingComputed,
            PipelineStage::KnnExecuted,
            PipelineStage::CompetitorsExtracted,
            PipelineStage::Formatted,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(
            names,
            [
                "start",
                "patents_fetched",
                "embedding_computed",
                "knn_executed",
                "competitors_extracted",
                "formatted"
            ]
        );
    }
}
