//! AI assistant pipeline: context assembly → hosted model → reconciliation.

pub mod context;
pub mod gateway;
pub mod prompts;
pub mod reconcile;
pub mod types;

pub use gateway::{Gateway, GatewayError, OpenAiClient};
pub use reconcile::ReconcileReport;
pub use types::{AiRequest, AiResponse, ArquivoCriado, ArquivoModificado, CodeAnalysis};

use crate::store::Store;
use anyhow::Result;

/// Reply sent when no provider credential is configured.
pub const NAO_CONFIGURADO: &str = "Assistente IA não está configurado. Configure OPENAI_API_KEY \
                                   para usar a funcionalidade completa.";

pub struct Assistant {
    gateway: Gateway,
}

impl Assistant {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Run one chat exchange. Upstream failures never escape: they degrade
    /// into an apologetic explanation so the HTTP layer still answers 200.
    pub async fn processar_mensagem(&self, store: &Store, request: &AiRequest) -> AiResponse {
        if !self.gateway.is_configured() {
            return AiResponse::text(NAO_CONFIGURADO);
        }

        match self.responder(store, request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("erro no assistente IA: {e:#}");
                AiResponse::text(format!(
                    "Erro no processamento: {e}. Verifique se a chave OPENAI_API_KEY está \
                     configurada corretamente."
                ))
            }
        }
    }

    async fn responder(&self, store: &Store, request: &AiRequest) -> Result<AiResponse> {
        let contexto = context::build_context(store.pool(), request).await?;
        let prompt = prompts::build_user_prompt(&request.mensagem, &contexto);

        let raw = self.gateway.chat_json(prompts::SYSTEM_PROMPT, &prompt).await?;
        let response = AiResponse::from_model_reply(&raw);

        if let Some(projeto_id) = request.projeto_id {
            let report = reconcile::apply(store.pool(), projeto_id, &response).await?;
            if !report.skipped.is_empty() {
                tracing::warn!(
                    skipped = ?report.skipped,
                    "instruções de modificação sem arquivo correspondente"
                );
            }
        }

        Ok(response)
    }

    /// Structured review for `/api/ai/analyze`.
    pub async fn analisar_codigo(
        &self,
        codigo: &str,
        linguagem: &str,
    ) -> Result<CodeAnalysis, GatewayError> {
        let raw = self
            .gateway
            .chat_json(
                &prompts::analysis_system(linguagem),
                &prompts::analysis_user(codigo, linguagem),
            )
            .await?;
        Ok(CodeAnalysis::from_model_reply(&raw))
    }

    /// Free-form generation for `/api/ai/generate`. Degrades to a commented
    /// error string, matching what the editor inserts verbatim.
    pub async fn gerar_codigo(&self, descricao: &str, linguagem: &str) -> String {
        match self
            .gateway
            .chat_text(
                &prompts::generation_system(linguagem),
                &format!("Gere código {linguagem} para: {descricao}"),
                Some(2000),
            )
            .await
        {
            Ok(codigo) => codigo,
            Err(GatewayError::NotConfigured) => {
                "// Assistente IA não configurado. Configure OPENAI_API_KEY.".into()
            }
            Err(e) => format!("// Erro na geração: {e}"),
        }
    }

    /// Plain-language explanation for `/api/ai/explain`.
    pub async fn explicar_codigo(
        &self,
        codigo: &str,
        linguagem: &str,
    ) -> Result<String, GatewayError> {
        self.gateway
            .chat_text(
                &prompts::explain_system(linguagem),
                &format!("Explique este código {linguagem}:\n\n```{linguagem}\n{codigo}\n```"),
                Some(1000),
            )
            .await
    }
}
