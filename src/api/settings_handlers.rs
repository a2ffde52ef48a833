//! Editor settings (singleton row).

use crate::store::models::{Settings, UpdateSettings};
use crate::store::queries;
use axum::{extract::State, Json};

use super::handlers::{AppError, SharedState};

/// GET /api/settings — defaults when nothing was ever saved
pub async fn get_settings(State(state): State<SharedState>) -> Result<Json<Settings>, AppError> {
    let settings = queries::get_settings(state.store.pool())
        .await?
        .unwrap_or_default();
    Ok(Json(settings))
}

/// POST /api/settings — partial upsert
pub async fn save_settings(
    State(state): State<SharedState>,
    Json(req): Json<UpdateSettings>,
) -> Result<Json<Settings>, AppError> {
    let settings = queries::upsert_settings(state.store.pool(), req).await?;
    Ok(Json(settings))
}
