//! File-system bridge endpoints ("local folder" mode).

use crate::workspace::{FileContent, TreeEntry};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::handlers::{AppError, SharedState};

#[derive(Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveRequest {
    pub path: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub path: Option<String>,
    pub is_directory: Option<bool>,
    pub content: Option<String>,
}

fn required_path(path: Option<String>) -> Result<String, AppError> {
    match path.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => Ok(p.to_string()),
        _ => Err(AppError::Validation(vec!["path é obrigatório".into()])),
    }
}

/// GET /api/files/tree
pub async fn tree(State(state): State<SharedState>) -> Result<Json<Vec<TreeEntry>>, AppError> {
    let entries = state.workspace.tree()?;
    Ok(Json(entries))
}

/// GET /api/files/content?path=
pub async fn content(
    State(state): State<SharedState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<FileContent>, AppError> {
    let path = required_path(query.path)?;
    let file = state.workspace.read(&path)?;
    Ok(Json(file))
}

/// POST /api/files/save
pub async fn save(
    State(state): State<SharedState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = required_path(req.path)?;
    let content = req.content.unwrap_or_default();
    state.workspace.write(&path, &content)?;
    Ok(Json(serde_json::json!({ "success": true, "path": path })))
}

/// POST /api/files/create — file or directory
pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let path = required_path(req.path)?;
    if req.is_directory.unwrap_or(false) {
        state.workspace.create_dir(&path)?;
    } else {
        state
            .workspace
            .write(&path, req.content.as_deref().unwrap_or(""))?;
    }
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "path": path })),
    ))
}

/// DELETE /api/files?path=
pub async fn delete(
    State(state): State<SharedState>,
    Query(query): Query<PathQuery>,
) -> Result<StatusCode, AppError> {
    let path = required_path(query.path)?;
    state.workspace.delete(&path)?;
    Ok(StatusCode::NO_CONTENT)
}
