//! In-memory document store
//!
//! Evaluates [`SearchRequest`] values over a fixed set of records, the way
//! the search engine would for the clause types the pipeline emits:
//! - `term`: exact match on a dotted path (a trailing `.keyword` is ignored)
//! - `exists`: at least one non-null value on the path
//! - `knn`: records carrying a vector of matching length, ranked by cosine
//!   similarity, truncated to the candidate pool and then to the page size
//!
//! Backs local runs with `--fixtures` and the test suites.

use super::query::{KnnClause, Query};
use super::{DocumentStore, SearchRequest, StoreError};
use crate::types::PatentFamilyRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

const KEYWORD_SUFFIX: &str = ".keyword";

/// A record alongside its JSON form, used for path lookups.
struct IndexedRecord {
    record: PatentFamilyRecord,
    doc: Value,
}

pub struct MemoryStore {
    records: Vec<IndexedRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<PatentFamilyRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| IndexedRecord {
                doc: serde_json::to_value(&record).unwrap_or_default(),
                record,
            })
            .collect();
        Self { records }
    }

    /// Load a JSON array of `_source` documents.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let fixture_error = |reason: String| StoreError::Fixture {
            path: path.display().to_string(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let records: Vec<PatentFamilyRecord> =
            serde_json::from_str(&contents).map_err(|e| fixture_error(e.to_string()))?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<PatentFamilyRecord>, StoreError> {
        let knn = request.query.knn_clause();

        let mut matched: Vec<(f64, &PatentFamilyRecord)> = self
            .records
            .iter()
            .filter(|r| matches(&request.query, &r.doc))
            .map(|r| {
                let score = knn
                    .and_then(|k| vector_at(&r.doc, &k.field).map(|v| cosine_similarity(&k.query_vector, &v)))
                    .unwrap_or(0.0);
                (score, &r.record)
            })
            .collect();

        if let Some(k) = knn {
            // stable sort keeps insertion order between equal scores
            matched.sort_by(|a, b| b.0.total_cmp(&a.0));
            matched.truncate(k.num_candidates);
        }
        matched.truncate(request.size);

        Ok(matched.into_iter().map(|(_, r)| r.clone()).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

fn matches(query: &Query, doc: &Value) -> bool {
    match query {
        Query::Term { field, value } => values_at(doc, field)
            .into_iter()
            .any(|v| term_equals(v, value)),
        Query::Exists { field } => values_at(doc, field).into_iter().any(|v| !v.is_null()),
        Query::Knn(knn) => knn_applies(knn, doc),
        Query::Bool(b) => {
            b.must.iter().all(|q| matches(q, doc)) && !b.must_not.iter().any(|q| matches(q, doc))
        }
    }
}

fn term_equals(candidate: &Value, value: &str) -> bool {
    match candidate {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        Value::Bool(b) => b.to_string() == value,
        _ => false,
    }
}

fn knn_applies(knn: &KnnClause, doc: &Value) -> bool {
    vector_at(doc, &knn.field).is_some_and(|v| v.len() == knn.query_vector.len())
}

/// All leaf values reachable through a dotted path, flattening arrays.
fn values_at<'a>(doc: &'a Value, field: &str) -> Vec<&'a Value> {
    let path = field.strip_suffix(KEYWORD_SUFFIX).unwrap_or(field);
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    collect(doc, &segments, &mut out);
    out
}

fn collect<'a>(value: &'a Value, path: &[&str], out: &mut Vec<&'a Value>) {
    if let Value::Array(items) = value {
        for item in items {
            collect(item, path, out);
        }
        return;
    }
    match path.split_first() {
        None => out.push(value),
        Some((head, rest)) => {
            if let Some(child) = value.get(*head) {
                collect(child, rest, out);
            }
        }
    }
}

fn vector_at(doc: &Value, field: &str) -> Option<Vec<f64>> {
    doc.get(field)?
        .as_array()?
        .iter()
        .map(Value::as_f64)
        .collect()
}

/// Cosine similarity; zero-norm vectors score 0.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
