//! Embedding aggregation: one representative vector per company

use crate::types::PatentFamilyRecord;

/// Aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("embedding dimension mismatch: expected {expected}, found {found} in family {family}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        family: String,
    },
    #[error("embedding of family {family} has no components")]
    ZeroDimension { family: String },
}

/// Element-wise arithmetic mean of every embedding present in `records`.
///
/// Records without an embedding are skipped. Returns `Ok(None)` when no
/// record carries one. All embeddings must share one non-zero length.
pub fn aggregate(records: &[PatentFamilyRecord]) -> Result<Option<Vec<f64>>, AggregateError> {
    let mut embedded = records
        .iter()
        .filter_map(|r| r.embedding.as_deref().map(|e| (r, e)));

    let Some((first_record, first)) = embedded.next() else {
        return Ok(None);
    };
    if first.is_empty() {
        return Err(AggregateError::ZeroDimension {
            family: family_label(first_record),
        });
    }

    let mut sum = first.to_vec();
    let mut count = 1usize;
    for (record, embedding) in embedded {
        if embedding.len() != sum.len() {
            return Err(AggregateError::DimensionMismatch {
                expected: sum.len(),
                found: embedding.len(),
                family: family_label(record),
            });
        }
        for (acc, value) in sum.iter_mut().zip(embedding) {
            *acc += value;
        }
        count += 1;
    }

    let n = count as f64;
    Ok(Some(sum.into_iter().map(|v| v / n).collect()))
}

fn family_label(record: &PatentFamilyRecord) -> String {
    match &record.family_id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
