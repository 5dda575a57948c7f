//! Patent family documents as stored in the search index

use crate::config::defaults::EMBEDDING_FIELD;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A display name extracted from a kNN hit.
///
/// `None` when the index carried a standardized-name entry without a `name`
/// value. Empty and absent names are dropped by the formatter.
pub type CandidateName = Option<String>;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One patent family record (`_source` of a search hit).
///
/// Every nested field is optional on the wire: a document lacking `members`
/// or name entries deserializes to empty collections instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatentFamilyRecord {
    /// Opaque family identifier (string or number in the index)
    #[serde(default)]
    pub family_id: Value,

    /// Parties associated with the family, lead member first
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,

    /// Precomputed family embedding; absence is a valid state
    #[serde(
        rename = "embeddings_768_bgebase",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub embedding: Option<Vec<f64>>,
}

impl PatentFamilyRecord {
    /// Name of the `_source` field holding the embedding.
    pub const fn embedding_field() -> &'static str {
        EMBEDDING_FIELD
    }

    /// The lead member of the family, if any.
    pub fn lead_member(&self) -> Option<&Member> {
        self.members.first()
    }
}

/// A party attached to a patent family.
///
/// Fields other than the standardized names (country, role, ids) are kept
/// verbatim in `extra` so the document serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub best_standardized_name: Vec<Name>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    /// Member carrying a single standardized name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            best_standardized_name: vec![Name::new(name)],
            ..Default::default()
        }
    }

    /// The first standardized-name entry, when the member has one.
    pub fn primary_name(&self) -> Option<&Name> {
        self.best_standardized_name.first()
    }
}

/// `{ "name": "..." }` entry of a member's standardized-name list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

/// Raw family view returned by the patents passthrough endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilySummary {
    pub family: Value,
    pub members: Vec<Member>,
    pub embedding: Option<Vec<f64>>,
}

impl From<PatentFamilyRecord> for FamilySummary {
    fn from(record: PatentFamilyRecord) -> Self {
        Self {
            family: record.family_id,
            members: record.members,
            embedding: record.embedding,
        }
    }
}
