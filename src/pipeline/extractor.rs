//! Candidate competitor names from kNN hits

use crate::types::{CandidateName, Member, PatentFamilyRecord};

/// One candidate per hit whose lead member has a standardized name.
///
/// Only the first member and its first standardized-name entry are read;
/// co-assignees are attributed to the lead member. Hits without name data
/// contribute nothing. Hit order is preserved.
pub fn extract_candidates(hits: &[PatentFamilyRecord]) -> Vec<CandidateName> {
    hits.iter()
        .filter_map(|hit| hit.lead_member().and_then(Member::primary_name))
        .map(|name| name.name.clone())
        .collect()
}
