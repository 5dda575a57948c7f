//! Elasticsearch client for the family index
//!
//! Both store calls are `POST {url}/{index}/_search`; hits are read from
//! `hits.hits[]._source`.

use super::{DocumentStore, SearchRequest, StoreError};
use crate::config::StoreConfig;
use crate::types::PatentFamilyRecord;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Longest slice of a non-JSON error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: PatentFamilyRecord,
}

/// HTTP client for an Elasticsearch cluster.
///
/// `reqwest::Client` pools connections internally, so one instance is
/// shared by all concurrent requests.
#[derive(Clone)]
pub struct ElasticStore {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticStore {
    /// Create a client for `index` on the cluster at `base_url`.
    pub fn new(base_url: &str, index: &str, timeout: Duration) -> Result<Self, StoreError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StoreError::Build(format!(
                "store URL must be http(s), got '{base_url}'"
            )));
        }
        if index.trim().is_empty() {
            return Err(StoreError::Build("index name is required".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.url,
            &config.index,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Get base URL for logging
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }
}

#[async_trait]
impl DocumentStore for ElasticStore {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<PatentFamilyRecord>, StoreError> {
        let resp = self
            .http
            .post(self.search_url())
            .json(&request.to_json())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                reason: describe_error_body(&String::from_utf8_lossy(&body)),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(index = %self.index, hits = parsed.hits.hits.len(), "Search completed");
        Ok(parsed.hits.hits.into_iter().map(|h| h.source).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let resp = self.http.get(&self.base_url).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "cluster answered {}",
                resp.status()
            )))
        }
    }

    fn backend_name(&self) -> &str {
        "elasticsearch"
    }
}

/// Condense an error response into one line.
///
/// Elasticsearch reports `{"error": {"type": ..., "reason": ...}}`; older
/// versions and proxies may send a bare string or a non-JSON body.
fn describe_error_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        if let Some(s) = error.as_str() {
            return s.to_string();
        }
        match (error["type"].as_str(), error["reason"].as_str()) {
            (Some(kind), Some(reason)) => return format!("{kind}: {reason}"),
            (None, Some(reason)) => return reason.to_string(),
            (Some(kind), None) => return kind.to_string(),
            (None, None) => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let err = ElasticStore::new("elasticsearch:9200", "idx", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::Build(_)));
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let store =
            ElasticStore::new("http://localhost:9200/", "family_g1_v2", Duration::from_secs(1))
                .unwrap();
        assert_eq!(store.base_url(), "http://localhost:9200");
        assert_eq!(store.search_url(), "http://localhost:9200/family_g1_v2/_search");
    }

    #[test]
    fn test_describe_structured_error() {
        let body = r#"{"error":{"root_cause":[],"type":"index_not_found_exception","reason":"no such index [family_g1_v2]"},"status":404}"#;
        assert_eq!(
            describe_error_body(body),
            "index_not_found_exception: no such index [family_g1_v2]"
        );
    }

    #[test]
    fn test_describe_string_and_plain_errors() {
        assert_eq!(describe_error_body(r#"{"error":"bad gateway"}"#), "bad gateway");
        assert_eq!(describe_error_body("  upstream timeout \n"), "upstream timeout");
        assert_eq!(describe_error_body(""), "empty response body");
        assert_eq!(describe_error_body(&"x".repeat(500)).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_hits_decode_from_source() {
        let body = serde_json::json!({
            "took": 3,
            "hits": {
                "total": {"value": 2},
                "hits": [
                    {"_id": "1", "_source": {"family_id": 1, "members": [{"best_standardized_name": [{"name": "B"}]}]}},
                    {"_id": "2"}
                ]
            }
        });
        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.hits.hits.len(), 2);
        assert_eq!(parsed.hits.hits[0].source.members.len(), 1);
        assert_eq!(parsed.hits.hits[1].source, PatentFamilyRecord::default());
    }
}
