//! Search requests issued by the competitor pipeline

use crate::config::defaults::{
    EMBEDDING_FIELD, STANDARDIZED_NAME_FIELD, STANDARDIZED_NAME_KEYWORD_FIELD,
};
use crate::config::SearchConfig;
use crate::store::{BoolQuery, KnnClause, Query, SearchRequest};

/// Exact-match lookup of every family listing `company` as a member.
pub fn build_family_query(company: &str, search: &SearchConfig) -> SearchRequest {
    SearchRequest::new(
        Query::term(STANDARDIZED_NAME_KEYWORD_FIELD, company),
        search.family_page_size,
    )
}

/// kNN retrieval around `vector`, skipping families of `exclude_company`
/// and families whose members carry no standardized name.
///
/// `vector` must be non-empty.
pub fn build_knn_query(vector: &[f64], exclude_company: &str, search: &SearchConfig) -> SearchRequest {
    debug_assert!(!vector.is_empty(), "kNN query vector must not be empty");

    let query = BoolQuery::new()
        .must(Query::exists(STANDARDIZED_NAME_FIELD))
        .must(Query::Knn(KnnClause {
            field: EMBEDDING_FIELD.to_string(),
            query_vector: vector.to_vec(),
            num_candidates: search.num_candidates,
        }))
        .must_not(Query::term(STANDARDIZED_NAME_KEYWORD_FIELD, exclude_company));

    SearchRequest::new(Query::Bool(query), search.k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_family_query_shape() {
        let request = build_family_query("Acme Corp", &SearchConfig::default());
        assert_eq!(
            request.to_json(),
            json!({
                "size": 10,
                "query": {"term": {"members.best_standardized_name.name.keyword": "Acme Corp"}}
            })
        );
    }

    #[test]
    fn test_knn_query_shape() {
        let request = build_knn_query(&[2.0, 2.0, 2.0], "A", &SearchConfig::default());
        assert_eq!(
            request.to_json(),
            json!({
                "size": 10,
                "query": {"bool": {
                    "must": [
                        {"exists": {"field": "members.best_standardized_name.name"}},
                        {"knn": {
                            "field": "embeddings_768_bgebase",
                            "query_vector": [2.0, 2.0, 2.0],
                            "num_candidates": 300
                        }}
                    ],
                    "must_not": [
                        {"term": {"members.best_standardized_name.name.keyword": "A"}}
                    ]
                }}
            })
        );
    }

    #[test]
    fn test_knn_query_follows_search_config() {
        let search = SearchConfig {
            num_candidates: 50,
            k: 3,
            family_page_size: 10,
        };
        let request = build_knn_query(&[1.0], "A", &search);
        assert_eq!(request.size, 3);
        assert_eq!(request.query.knn_clause().map(|k| k.num_candidates), Some(50));
    }

    #[test]
    fn test_building_twice_yields_equal_requests() {
        let search = SearchConfig::default();
        assert_eq!(
            build_knn_query(&[0.1, 0.2], "A", &search),
            build_knn_query(&[0.1, 0.2], "A", &search)
        );
    }
}
