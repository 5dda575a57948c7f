//! Shared data structures for patent-family competitor discovery
//!
//! - [`PatentFamilyRecord`]: one `_source` document from the family index
//! - [`Member`] / [`Name`]: party metadata attached to a family
//! - [`CandidateName`]: a display name pulled out of a kNN hit
//! - [`FamilySummary`]: passthrough shape served by `GET /patents/{company}`

mod family;

pub use family::*;
