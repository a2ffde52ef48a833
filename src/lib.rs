//! Estudio
//!
//! Backend for a browser-based code studio:
//! - SQLite store for projects, files, chat history and editor settings
//! - AI assistant pipeline: context assembly → hosted model → reconciliation
//!   of modified/created files back into the store
//! - Local workspace bridge for editing real files on disk
//! - REST API consumed by the browser editor

pub mod api;
pub mod assistant;
pub mod language;
pub mod store;
pub mod workspace;

use anyhow::Result;
use std::sync::Arc;

/// Application configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (`DATABASE_URL`)
    pub database_url: String,
    /// Hosted-model credential — None disables the assistant (`OPENAI_API_KEY`)
    pub openai_api_key: Option<String>,
    /// Chat-completions endpoint base (`OPENAI_BASE_URL`)
    pub openai_base_url: String,
    /// Model identifier (`OPENAI_MODEL`)
    pub openai_model: String,
    /// Listen port (`PORT`)
    pub server_port: u16,
    /// Comma-separated allowed browser origins — None allows any (`CORS_ORIGIN`)
    pub cors_origins: Option<Vec<String>>,
    /// Root directory for the local file-system bridge (`WORKSPACE_PATH`)
    pub workspace_path: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        let cors_origins = std::env::var("CORS_ORIGIN").ok().map(|raw| {
            raw.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect::<Vec<_>>()
        });

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:estudio.db".into()),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
            server_port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            cors_origins: cors_origins.filter(|o| !o.is_empty()),
            workspace_path: std::env::var("WORKSPACE_PATH").unwrap_or_else(|_| ".".into()),
        })
    }
}

/// Start the HTTP server with all services wired from `config`.
pub async fn start_server(config: Config) -> Result<()> {
    let store = store::Store::open(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let gateway = assistant::Gateway::from_config(&config);
    if gateway.is_configured() {
        tracing::info!("AI assistant configured (model: {})", config.openai_model);
    } else {
        tracing::warn!("OPENAI_API_KEY not set — AI assistant disabled");
    }

    let state = Arc::new(api::handlers::ServerState {
        store,
        assistant: assistant::Assistant::new(gateway),
        workspace: workspace::Workspace::new(&config.workspace_path),
        cors_origins: config.cors_origins.clone(),
    });

    let app = api::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
