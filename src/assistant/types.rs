//! Wire types for the AI assistant. Field names follow the JSON contract the
//! browser editor and the hosted model already agree on (Portuguese keys).

use serde::{Deserialize, Serialize};

/// One chat exchange as received from the editor. Transient, never persisted
/// as-is — only its side effects (file changes) are.
#[derive(Debug, Clone, Deserialize)]
pub struct AiRequest {
    pub mensagem: String,
    #[serde(rename = "projetoId")]
    pub projeto_id: Option<i64>,
    #[serde(rename = "arquivoId")]
    pub arquivo_id: Option<i64>,
    #[serde(rename = "codigoSelecionado")]
    pub codigo_selecionado: Option<String>,
    pub linguagem: Option<String>,
}

/// Structured reply from the hosted model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiResponse {
    pub resposta: String,
    #[serde(rename = "codigoGerado", skip_serializing_if = "Option::is_none")]
    pub codigo_gerado: Option<String>,
    #[serde(rename = "arquivosModificados", skip_serializing_if = "Option::is_none")]
    pub arquivos_modificados: Option<Vec<ArquivoModificado>>,
    #[serde(rename = "arquivosCriados", skip_serializing_if = "Option::is_none")]
    pub arquivos_criados: Option<Vec<ArquivoCriado>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acoes: Option<Vec<String>>,
}

impl AiResponse {
    /// Reply with just an explanation and no code/file instructions.
    pub fn text(resposta: impl Into<String>) -> Self {
        Self {
            resposta: resposta.into(),
            ..Default::default()
        }
    }

    /// Parse the model's raw reply. A non-JSON payload degrades to an empty
    /// response (all optional fields absent) instead of an error.
    pub fn from_model_reply(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

/// Instruction to overwrite an existing file, referenced by name or path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArquivoModificado {
    pub nome: String,
    #[serde(rename = "novoConteudo")]
    pub novo_conteudo: String,
}

/// Instruction to create a new file in the active project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArquivoCriado {
    pub nome: String,
    pub caminho: String,
    pub conteudo: String,
}

/// Structured code review returned by `/api/ai/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodeAnalysis {
    pub suggestions: Vec<String>,
    pub improvements: Vec<String>,
    pub issues: Vec<String>,
    pub rating: i32,
}

impl CodeAnalysis {
    /// Parse the model's reply, clamping the rating into 1..=10.
    pub fn from_model_reply(raw: &str) -> Self {
        let mut analysis: Self = serde_json::from_str(raw).unwrap_or_default();
        if analysis.rating == 0 {
            analysis.rating = 5;
        }
        analysis.rating = analysis.rating.clamp(1, 10);
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parses_full_shape() {
        let raw = r#"{
            "resposta": "pronto",
            "codigoGerado": "let x = 1;",
            "arquivosModificados": [{"nome": "index.js", "novoConteudo": "console.log(1)"}],
            "arquivosCriados": [{"nome": "new.py", "caminho": "/p/new.py", "conteudo": "print(1)"}],
            "acoes": ["arquivo modificado"]
        }"#;
        let resp = AiResponse::from_model_reply(raw);
        assert_eq!(resp.resposta, "pronto");
        assert_eq!(resp.codigo_gerado.as_deref(), Some("let x = 1;"));
        assert_eq!(resp.arquivos_modificados.unwrap()[0].nome, "index.js");
        assert_eq!(resp.arquivos_criados.unwrap()[0].caminho, "/p/new.py");
        assert_eq!(resp.acoes.unwrap().len(), 1);
    }

    #[test]
    fn test_non_json_reply_degrades_to_empty() {
        let resp = AiResponse::from_model_reply("desculpe, não consegui");
        assert_eq!(resp.resposta, "");
        assert!(resp.codigo_gerado.is_none());
        assert!(resp.arquivos_modificados.is_none());
        assert!(resp.arquivos_criados.is_none());
        assert!(resp.acoes.is_none());
    }

    #[test]
    fn test_partial_reply_leaves_rest_absent() {
        let resp = AiResponse::from_model_reply(r#"{"resposta": "só texto"}"#);
        assert_eq!(resp.resposta, "só texto");
        assert!(resp.arquivos_modificados.is_none());
    }

    #[test]
    fn test_analysis_rating_clamped() {
        let high = CodeAnalysis::from_model_reply(r#"{"rating": 42}"#);
        assert_eq!(high.rating, 10);
        let low = CodeAnalysis::from_model_reply(r#"{"rating": -3}"#);
        assert_eq!(low.rating, 1);
        let missing = CodeAnalysis::from_model_reply(r#"{"suggestions": ["ok"]}"#);
        assert_eq!(missing.rating, 5);
        let garbage = CodeAnalysis::from_model_reply("not json");
        assert_eq!(garbage.rating, 5);
    }
}
