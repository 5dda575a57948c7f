//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! every endpoint using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use competitor_scout::config::SearchConfig;
use competitor_scout::store::{DocumentStore, MemoryStore, SearchRequest, StoreError};
use competitor_scout::{create_app, CompetitorFinder, Member, PatentFamilyRecord, ServiceState};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Store whose every call fails, as an unreachable cluster would.
struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<PatentFamilyRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn backend_name(&self) -> &str {
        "unreachable"
    }
}

fn family(id: &str, names: &[&str], embedding: Option<Vec<f64>>) -> PatentFamilyRecord {
    PatentFamilyRecord {
        family_id: json!(id),
        members: names.iter().map(|n| Member::named(*n)).collect(),
        embedding,
    }
}

fn sample_families() -> Vec<PatentFamilyRecord> {
    vec![
        family("A-1", &["A"], Some(vec![1.0, 2.0, 3.0])),
        family("A-2", &["A"], Some(vec![3.0, 2.0, 1.0])),
        family("B-1", &["B", "A"], Some(vec![2.0, 2.0, 2.1])),
        family("C-1", &["C"], Some(vec![1.0, 2.0, 2.0])),
        family("U-1", &[], Some(vec![2.0, 2.0, 2.0])),
        family("Z-1", &["Z"], None),
        family("Acme Corp-1", &["Acme Corp"], Some(vec![9.0, 0.0, 0.0])),
    ]
}

fn app_with(store: Arc<dyn DocumentStore>) -> Router {
    create_app(ServiceState::new(CompetitorFinder::new(
        store,
        SearchConfig::default(),
    )))
}

fn memory_app() -> Router {
    app_with(Arc::new(MemoryStore::new(sample_families())))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Mean of [1,2,3] and [3,2,1] is [2,2,2]; B sits closer to it than C.
#[tokio::test]
async fn test_competitors_sentence_for_embedded_company() {
    let store = MemoryStore::new(vec![
        family("A-1", &["A"], Some(vec![1.0, 2.0, 3.0])),
        family("A-2", &["A"], Some(vec![3.0, 2.0, 1.0])),
        family("B-1", &["B"], Some(vec![2.0, 2.0, 2.1])),
        family("C-1", &["C"], Some(vec![1.0, 2.0, 2.0])),
    ]);
    let (status, body) = get_json(app_with(Arc::new(store)), "/competitors/A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "The competitors of A are B, and C."}));
}

/// B-1 lists A as a co-member, so the exclusion clause drops it from A's
/// results; unnamed and vectorless families never match.
#[tokio::test]
async fn test_self_exclusion_covers_co_members() {
    let (status, body) = get_json(memory_app(), "/competitors/A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "The competitors of A are C, and Acme Corp."}));
}

#[tokio::test]
async fn test_competitors_of_b() {
    let (status, body) = get_json(memory_app(), "/competitors/B").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["detail"],
        "The competitors of B are C, A, and Acme Corp."
    );
}

#[tokio::test]
async fn test_company_without_embeddings() {
    let (status, body) = get_json(memory_app(), "/competitors/Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "No embeddings found for the given company.");
}

#[tokio::test]
async fn test_unknown_company_reports_no_embeddings() {
    let (status, body) = get_json(memory_app(), "/competitors/Nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "No embeddings found for the given company.");
}

#[tokio::test]
async fn test_path_escaped_company_name() {
    let (status, body) = get_json(memory_app(), "/competitors/Acme%20Corp").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["detail"],
        "The competitors of Acme Corp are A, B, and C."
    );
}

#[tokio::test]
async fn test_store_failure_is_bad_request() {
    let (status, body) = get_json(app_with(Arc::new(UnreachableStore)), "/competitors/A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("An error occurred: "), "{detail}");
    assert!(detail.contains("connection refused"));
}

#[tokio::test]
async fn test_patents_passthrough() {
    let (status, body) = get_json(memory_app(), "/patents/A").await;
    assert_eq!(status, StatusCode::OK);
    let families = body.as_array().unwrap();
    assert_eq!(families.len(), 3);
    assert_eq!(families[0]["family"], "A-1");
    assert_eq!(families[0]["embedding"], json!([1.0, 2.0, 3.0]));
    assert_eq!(
        families[2]["members"][1]["best_standardized_name"][0]["name"],
        "A"
    );
}

#[tokio::test]
async fn test_patents_without_embedding_report_null() {
    let (status, body) = get_json(memory_app(), "/patents/Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["family"], "Z-1");
    assert!(body[0]["embedding"].is_null());
}

#[tokio::test]
async fn test_patents_keep_unmodelled_member_fields() {
    let record: PatentFamilyRecord = serde_json::from_value(json!({
        "family_id": "A-9",
        "members": [{
            "best_standardized_name": [{"name": "A", "id": 7}],
            "country": "US",
            "role": "assignee"
        }],
        "embeddings_768_bgebase": [1.0, 0.0]
    }))
    .unwrap();
    let app = app_with(Arc::new(MemoryStore::new(vec![record])));

    let (status, body) = get_json(app, "/patents/A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body[0]["members"],
        json!([{
            "best_standardized_name": [{"name": "A", "id": 7}],
            "country": "US",
            "role": "assignee"
        }])
    );
}

#[tokio::test]
async fn test_patents_store_failure_is_bad_request() {
    let (status, body) = get_json(app_with(Arc::new(UnreachableStore)), "/patents/A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred: "));
}

#[tokio::test]
async fn test_root_greeting() {
    let (status, body) = get_json(memory_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("Welcome"));
}

#[tokio::test]
async fn test_health_reflects_store() {
    let (status, body) = get_json(memory_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["store_reachable"], true);

    let (status, body) = get_json(app_with(Arc::new(UnreachableStore)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store_reachable"], false);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = memory_app()
        .oneshot(Request::builder().uri("/competitors").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
