//! `{"detail": "..."}` response body shared by the lookup endpoints.

use crate::pipeline::{Outcome, NO_EMBEDDINGS_DETAIL};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Prefix of every failure detail.
pub const ERROR_PREFIX: &str = "An error occurred: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn ok(detail: impl Into<String>) -> Response {
        let body = Self {
            detail: detail.into(),
        };
        (StatusCode::OK, axum::Json(body)).into_response()
    }

    pub fn error(message: impl Display) -> Response {
        let body = Self {
            detail: format!("{ERROR_PREFIX}{message}"),
        };
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Competitors(sentence) => Detail::ok(sentence),
            Self::NoSignal => Detail::ok(NO_EMBEDDINGS_DETAIL),
            Self::Failed { message, .. } => Detail::error(message),
        }
    }
}
