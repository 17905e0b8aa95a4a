//! Shared request state and the API error type.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use a2ui_protocol::ValidationReport;
use a2ui_store::{ActionRegistry, ComponentStore};

/// Process-wide shared instances, injected into every handler.
///
/// The composition root: constructed once at startup; handlers receive
/// handles, never construct their own.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ComponentStore>,
    pub actions: Arc<ActionRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        let store = Arc::new(ComponentStore::new());
        let actions = Arc::new(ActionRegistry::new(store.clone()));
        Self { store, actions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("component with id '{0}' not found")]
    ComponentNotFound(String),

    #[error("{0}")]
    MissingId(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(ValidationReport),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::ComponentNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string(), None)
            }
            ApiError::MissingId(_) => (StatusCode::BAD_REQUEST, "MISSING_ID", self.to_string(), None),
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string(), None)
            }
            ApiError::Validation(report) => {
                let message = report
                    .errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| self.to_string());
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    message,
                    Some(json!({ "errors": report.errors })),
                )
            }
        };

        let mut error = json!({ "code": code, "message": message });
        if let Some(details) = details {
            error["details"] = details;
        }
        let body = Json(json!({ "success": false, "error": error }));
        (status, body).into_response()
    }
}
