//! System-wide default constants.
//!
//! Index layout and search parameters shared by the query builders, the
//! store implementations and the configuration defaults.

// ============================================================================
// Index layout
// ============================================================================

/// Index holding one document per patent family.
pub const FAMILY_INDEX: &str = "family_g1_v2";

/// Dense-vector field carrying the 768-dimensional family embedding.
pub const EMBEDDING_FIELD: &str = "embeddings_768_bgebase";

/// Text field with a member's standardized display name.
pub const STANDARDIZED_NAME_FIELD: &str = "members.best_standardized_name.name";

/// Keyword sub-field used for exact name matches.
pub const STANDARDIZED_NAME_KEYWORD_FIELD: &str = "members.best_standardized_name.name.keyword";

// ============================================================================
// Search
// ============================================================================

/// Approximate matches considered before final kNN ranking.
pub const KNN_NUM_CANDIDATES: usize = 300;

/// Competitor hits returned by the kNN query.
pub const KNN_RESULT_SIZE: usize = 10;

/// Page size of the exact-match family lookup.
///
/// Matches the search engine's default page size.
pub const FAMILY_PAGE_SIZE: usize = 10;

/// Upper bound the search engine accepts for `num_candidates`.
pub const MAX_NUM_CANDIDATES: usize = 10_000;

// ============================================================================
// Store / Server
// ============================================================================

/// Document store endpoint used when nothing else is configured.
pub const STORE_URL: &str = "http://elasticsearch:9200";

/// Per-request deadline for document store calls (seconds).
pub const STORE_TIMEOUT_SECS: u64 = 30;

/// HTTP bind address.
pub const BIND_ADDRESS: &str = "0.0.0.0:8000";
