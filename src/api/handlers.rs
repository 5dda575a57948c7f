//! HTTP handlers

use super::envelope::Detail;
use super::ServiceState;
use crate::types::FamilySummary;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: String,
    pub store_reachable: bool,
    pub checked_at: String,
}

/// GET /
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to competitor-scout!",
    })
}

/// GET /health - reports whether the document store answers
pub async fn get_health(State(state): State<ServiceState>) -> Json<HealthResponse> {
    let store = state.finder.store();
    let reachable = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = store.backend_name(), error = %e, "Document store ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" },
        backend: store.backend_name().to_string(),
        store_reachable: reachable,
        checked_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /patents/{company} - raw exact-match families
pub async fn get_patents(
    State(state): State<ServiceState>,
    Path(company): Path<String>,
) -> Response {
    match state.finder.fetch_families(&company).await {
        Ok(families) => {
            let body: Vec<FamilySummary> = families.into_iter().map(FamilySummary::from).collect();
            Json(body).into_response()
        }
        Err(e) => {
            warn!(company = %company, error = %e, "Family lookup failed");
            Detail::error(e)
        }
    }
}

/// GET /competitors/{company}
pub async fn get_competitors(
    State(state): State<ServiceState>,
    Path(company): Path<String>,
) -> Response {
    state.finder.find_competitors(&company).await.into_response()
}
