//! API route definitions

use super::chat_handlers;
use super::fs_handlers;
use super::handlers::{self, SharedState};
use super::project_handlers;
use super::settings_handlers;
use axum::http::HeaderValue;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Development mode: any origin
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Create the API router
pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(state.cors_origins.as_deref());

    Router::new()
        // Status
        .route("/api/status", get(handlers::status))
        // ====================================================================
        // Projects
        // ====================================================================
        .route(
            "/api/projetos",
            get(project_handlers::list_projects).post(project_handlers::create_project),
        )
        .route(
            "/api/projetos/{id}",
            get(project_handlers::get_project)
                .put(project_handlers::update_project)
                .delete(project_handlers::delete_project),
        )
        .route(
            "/api/projetos/{id}/arquivos",
            get(project_handlers::list_project_files),
        )
        // ====================================================================
        // Files (store-backed)
        // ====================================================================
        .route("/api/arquivos", post(project_handlers::create_file))
        .route(
            "/api/arquivos/{id}",
            get(project_handlers::get_file)
                .put(project_handlers::update_file)
                .delete(project_handlers::delete_file),
        )
        // ====================================================================
        // Chat + AI assistant
        // ====================================================================
        .route("/api/chat", post(chat_handlers::chat))
        .route("/api/chat/messages", get(chat_handlers::list_messages))
        .route("/api/chat/clear", delete(chat_handlers::clear_messages))
        .route("/api/ai/analyze", post(chat_handlers::analyze))
        .route("/api/ai/generate", post(chat_handlers::generate))
        .route("/api/ai/explain", post(chat_handlers::explain))
        // ====================================================================
        // File-system bridge (local folder mode)
        // ====================================================================
        .route("/api/files/tree", get(fs_handlers::tree))
        .route("/api/files/content", get(fs_handlers::content))
        .route("/api/files/save", post(fs_handlers::save))
        .route("/api/files/create", post(fs_handlers::create))
        .route("/api/files", delete(fs_handlers::delete))
        // ====================================================================
        // Settings
        // ====================================================================
        .route(
            "/api/settings",
            get(settings_handlers::get_settings).post(settings_handlers::save_settings),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
