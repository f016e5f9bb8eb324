//! Result envelopes decoded from query and search responses.

use serde::{Deserialize, Serialize};

use crate::sobject::SObject;

/// Envelope returned by the `/query` endpoint.
///
/// Records keep the server's order; they are never re-sorted. When `done` is
/// false the continuation URL is surfaced but not followed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub next_records_url: String,
    #[serde(default)]
    pub records: Vec<SObject>,
}

/// Envelope returned by the parameterized search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub search_records: Vec<SObject>,
}
