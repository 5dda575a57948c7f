//! Immutable search request values and their Elasticsearch JSON form

use serde_json::{json, Value};

/// A single query clause.
///
/// Clauses compose into a tree through [`BoolQuery`]; nothing is mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact match of `value` against a keyword field
    Term { field: String, value: String },
    /// The field holds at least one non-null value
    Exists { field: String },
    /// Approximate nearest-neighbour similarity on a dense-vector field
    Knn(KnnClause),
    /// Boolean composition of clauses
    Bool(BoolQuery),
}

/// kNN clause parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnClause {
    pub field: String,
    pub query_vector: Vec<f64>,
    /// Approximate matches gathered before final ranking
    pub num_candidates: usize,
}

/// `must` clauses all have to match; any matching `must_not` clause rejects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub must_not: Vec<Query>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn must(mut self, clause: Query) -> Self {
        self.must.push(clause);
        self
    }

    #[must_use]
    pub fn must_not(mut self, clause: Query) -> Self {
        self.must_not.push(clause);
        self
    }
}

impl Query {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    /// The scoring kNN clause, searched through `must` branches only.
    pub fn knn_clause(&self) -> Option<&KnnClause> {
        match self {
            Self::Knn(knn) => Some(knn),
            Self::Bool(b) => b.must.iter().find_map(Self::knn_clause),
            Self::Term { .. } | Self::Exists { .. } => None,
        }
    }

    /// Elasticsearch query DSL representation.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Self::Exists { field } => json!({ "exists": { "field": field } }),
            Self::Knn(knn) => json!({
                "knn": {
                    "field": knn.field,
                    "query_vector": knn.query_vector,
                    "num_candidates": knn.num_candidates,
                }
            }),
            Self::Bool(b) => {
                let mut body = serde_json::Map::new();
                if !b.must.is_empty() {
                    body.insert(
                        "must".to_string(),
                        Value::Array(b.must.iter().map(Self::to_json).collect()),
                    );
                }
                if !b.must_not.is_empty() {
                    body.insert(
                        "must_not".to_string(),
                        Value::Array(b.must_not.iter().map(Self::to_json).collect()),
                    );
                }
                json!({ "bool": body })
            }
        }
    }
}

/// A complete search: query plus page size.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: Query,
    pub size: usize,
}

impl SearchRequest {
    pub const fn new(query: Query, size: usize) -> Self {
        Self { query, size }
    }

    /// Request body for `POST /{index}/_search`.
    pub fn to_json(&self) -> Value {
        json!({
            "size": self.size,
            "query": self.query.to_json(),
        })
    }
}
