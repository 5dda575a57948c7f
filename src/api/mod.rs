//! REST API module using Axum
//!
//! - `GET /`                      - greeting
//! - `GET /health`                - document store reachability
//! - `GET /patents/{company}`     - raw exact-match family records
//! - `GET /competitors/{company}` - competitor sentence

pub mod envelope;
pub mod handlers;

use crate::pipeline::CompetitorFinder;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by all handlers.
#[derive(Clone)]
pub struct ServiceState {
    pub finder: Arc<CompetitorFinder>,
}

impl ServiceState {
    pub fn new(finder: CompetitorFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }
}

/// Build the complete application router.
pub fn create_app(state: ServiceState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::get_health))
        .route("/patents/:company", get(handlers::get_patents))
        .route("/competitors/:company", get(handlers::get_competitors))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
