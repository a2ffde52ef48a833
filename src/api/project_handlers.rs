//! Project and file CRUD handlers (Portuguese route set).

use crate::language;
use crate::store::models::{File, NewFile, NewProject, Project, UpdateFile, UpdateProject};
use crate::store::queries;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::handlers::{AppError, SharedState};

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub language: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    pub name: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
    pub project_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub language: Option<String>,
    pub size: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    pub name: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub size: Option<i64>,
}

// ============================================================================
// Projects
// ============================================================================

/// GET /api/projetos
pub async fn list_projects(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = queries::list_projects(state.store.pool()).await?;
    Ok(Json(projects))
}

/// POST /api/projetos
pub async fn create_project(
    State(state): State<SharedState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let name = match req.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(AppError::Validation(vec!["name é obrigatório".into()])),
    };

    let path = req
        .path
        .unwrap_or_else(|| format!("/projetos/{}", name.to_lowercase().replace(' ', "-")));

    let project = queries::create_project(
        state.store.pool(),
        NewProject {
            name,
            description: req.description,
            path,
            language: req.language.unwrap_or_else(|| "javascript".into()),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projetos/{id}
pub async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = queries::get_project(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado".into()))?;
    Ok(Json(project))
}

/// PUT /api/projetos/{id}
pub async fn update_project(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    queries::get_project(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado".into()))?;

    let project = queries::update_project(state.store.pool(), id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado".into()))?;
    Ok(Json(project))
}

/// DELETE /api/projetos/{id} — files go with the project (cascade)
pub async fn delete_project(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !queries::delete_project(state.store.pool(), id).await? {
        return Err(AppError::NotFound("Projeto não encontrado".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projetos/{id}/arquivos
pub async fn list_project_files(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<File>>, AppError> {
    queries::get_project(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado".into()))?;

    let files = queries::list_files(state.store.pool(), id).await?;
    Ok(Json(files))
}

// ============================================================================
// Files
// ============================================================================

/// POST /api/arquivos
pub async fn create_file(
    State(state): State<SharedState>,
    Json(req): Json<CreateFileRequest>,
) -> Result<(StatusCode, Json<File>), AppError> {
    let mut details = Vec::new();
    if req.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
        details.push("name é obrigatório".to_string());
    }
    if req.project_id.is_none() {
        details.push("projectId é obrigatório".to_string());
    }
    if !details.is_empty() {
        return Err(AppError::Validation(details));
    }

    let name = req.name.unwrap_or_default().trim().to_string();
    let project_id = req.project_id.unwrap_or_default();

    queries::get_project(state.store.pool(), project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado".into()))?;

    let size = req
        .size
        .unwrap_or_else(|| req.content.as_deref().map(|c| c.len() as i64).unwrap_or(0));
    let language = req
        .language
        .unwrap_or_else(|| language::detect(&name).to_string());

    let file = queries::create_file(
        state.store.pool(),
        NewFile {
            path: req.path.unwrap_or_else(|| format!("/{name}")),
            name,
            content: req.content,
            project_id,
            kind: req.kind.unwrap_or_else(|| "file".into()),
            language: Some(language),
            size,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/arquivos/{id}
pub async fn get_file(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<File>, AppError> {
    let file = queries::get_file(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Arquivo não encontrado".into()))?;
    Ok(Json(file))
}

/// PUT /api/arquivos/{id}
pub async fn update_file(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFileRequest>,
) -> Result<Json<File>, AppError> {
    queries::get_file(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Arquivo não encontrado".into()))?;

    // Size tracks content unless the client sends an explicit value
    let size = req
        .size
        .or_else(|| req.content.as_deref().map(|c| c.len() as i64));

    let file = queries::update_file(
        state.store.pool(),
        id,
        UpdateFile {
            name: req.name,
            path: req.path,
            content: req.content,
            language: req.language,
            size,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Arquivo não encontrado".into()))?;
    Ok(Json(file))
}

/// DELETE /api/arquivos/{id}
pub async fn delete_file(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !queries::delete_file(state.store.pool(), id).await? {
        return Err(AppError::NotFound("Arquivo não encontrado".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
