//! Chat pipeline and AI utility endpoints.

use crate::assistant::{AiRequest, AiResponse, GatewayError};
use crate::store::queries;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::handlers::{AppError, SharedState};
use crate::store::models::ChatMessage;

/// POST /api/chat
///
/// Runs the full assistant pipeline and appends both turns to the
/// server-side history. Provider failures never surface as HTTP errors,
/// the reply carries the explanation instead.
pub async fn chat(
    State(state): State<SharedState>,
    Json(req): Json<AiRequest>,
) -> Result<Json<AiResponse>, AppError> {
    if req.mensagem.trim().is_empty() {
        return Err(AppError::Validation(vec!["mensagem é obrigatória".into()]));
    }

    let user_metadata = serde_json::json!({
        "projetoId": req.projeto_id,
        "arquivoId": req.arquivo_id,
    });
    queries::create_chat_message(state.store.pool(), "user", &req.mensagem, Some(&user_metadata))
        .await?;

    let response = state.assistant.processar_mensagem(&state.store, &req).await;

    let assistant_metadata = serde_json::json!({
        "acoes": response.acoes,
        "arquivosModificados": response
            .arquivos_modificados
            .as_ref()
            .map(|mods| mods.iter().map(|m| m.nome.clone()).collect::<Vec<_>>()),
        "arquivosCriados": response
            .arquivos_criados
            .as_ref()
            .map(|news| news.iter().map(|c| c.nome.clone()).collect::<Vec<_>>()),
    });
    queries::create_chat_message(
        state.store.pool(),
        "assistant",
        &response.resposta,
        Some(&assistant_metadata),
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/chat/messages
pub async fn list_messages(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = queries::list_chat_messages(state.store.pool()).await?;
    Ok(Json(messages))
}

/// DELETE /api/chat/clear
pub async fn clear_messages(State(state): State<SharedState>) -> Result<StatusCode, AppError> {
    queries::clear_chat_messages(state.store.pool()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// AI utilities
// ============================================================================

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub code: Option<String>,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub code: String,
    pub language: String,
}

#[derive(Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

fn map_gateway_error(err: GatewayError) -> AppError {
    match err {
        GatewayError::NotConfigured => AppError::BadRequest(
            "Assistente IA não configurado. Configure OPENAI_API_KEY.".into(),
        ),
        other => AppError::Internal(other.into()),
    }
}

/// POST /api/ai/analyze
pub async fn analyze(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<crate::assistant::CodeAnalysis>, AppError> {
    let code = match req.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err(AppError::Validation(vec!["code é obrigatório".into()])),
    };
    let language = req.language.unwrap_or_else(|| "javascript".into());

    let analysis = state
        .assistant
        .analisar_codigo(&code, &language)
        .await
        .map_err(map_gateway_error)?;
    Ok(Json(analysis))
}

/// POST /api/ai/generate
pub async fn generate(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = match req.prompt.as_deref().map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => return Err(AppError::Validation(vec!["prompt é obrigatório".into()])),
    };
    let language = req.language.unwrap_or_else(|| "javascript".into());

    // Degrades to a commented error string, editor inserts it verbatim
    let code = state.assistant.gerar_codigo(&prompt, &language).await;
    Ok(Json(GenerateResponse { code, language }))
}

/// POST /api/ai/explain
pub async fn explain(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ExplainResponse>, AppError> {
    let code = match req.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err(AppError::Validation(vec!["code é obrigatório".into()])),
    };
    let language = req.language.unwrap_or_else(|| "javascript".into());

    let explanation = state
        .assistant
        .explicar_codigo(&code, &language)
        .await
        .map_err(map_gateway_error)?;
    Ok(Json(ExplainResponse { explanation }))
}
