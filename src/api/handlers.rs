//! Shared server state, error envelope and the status endpoint.

use crate::assistant::Assistant;
use crate::store::Store;
use crate::workspace::{Workspace, WorkspaceError};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub store: Store,
    pub assistant: Assistant,
    pub workspace: Workspace,
    /// Allowed browser origins — None allows any (development mode)
    pub cors_origins: Option<Vec<String>>,
}

pub type SharedState = Arc<ServerState>;

// ============================================================================
// Error envelope
// ============================================================================

pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    /// 400 with a field-level detail list
    Validation(Vec<String>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "Dados inválidos", "details": details })),
            )
                .into_response(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<WorkspaceError> for AppError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::InvalidPath(_) => AppError::BadRequest(err.to_string()),
            WorkspaceError::NotFound(_) => AppError::NotFound(err.to_string()),
            WorkspaceError::Io(_) => AppError::Internal(err.into()),
        }
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub ia: &'static str,
    pub timestamp: String,
}

/// GET /api/status
pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    let database = if state.store.ping().await {
        "conectado"
    } else {
        "erro"
    };
    let ia = if state.assistant.is_configured() {
        "configurado"
    } else {
        "não configurado"
    };

    Json(StatusResponse {
        status: "funcionando",
        database,
        ia,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
