use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::aggregate::AggregateReport;
use crate::registry::LanguageProfile;
use crate::service::{CheckError, CheckService};

pub(super) const INDEX_HTML: &str = include_str!("assets/index.html");

/// Body of `POST /api/check`
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// JSON error body: `{error}` for request problems, `{error, details}` for faults
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            details: None,
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Internal server error".to_string(),
            details: Some(details.into()),
        }
    }
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Internal(details) => ApiError::internal(details),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub(super) async fn index() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        INDEX_HTML,
    )
}

pub(super) async fn check(
    State(service): State<CheckService>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<AggregateReport>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected check request body");
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let language = request.language.unwrap_or_default();
    match service.handle_check(&request.text, &language).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            if e.is_client_error() {
                warn!(error = %e, "Check request rejected");
            } else {
                error!(error = %e, "Check request failed");
            }
            Err(e.into())
        }
    }
}

pub(super) async fn languages(State(service): State<CheckService>) -> Json<Vec<LanguageProfile>> {
    Json(service.registry().profiles().cloned().collect())
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
