//! Reconciliation: apply the model's structured reply to the store.
//!
//! "Soft" instructions (by file name) become "hard" operations (by file id).
//! Each instruction is an individual upsert; there is no multi-file
//! transaction, so partial application is possible and observable through
//! the returned report.

use crate::language;
use crate::store::models::NewFile;
use crate::store::queries;
use anyhow::Result;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;

use super::types::AiResponse;

/// What reconciliation actually did. `skipped` names modify instructions
/// that matched no stored file — they are dropped by policy, never turned
/// into file creations.
#[derive(Debug, Default, Serialize)]
pub struct ReconcileReport {
    pub updated: Vec<String>,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

pub async fn apply(
    pool: &SqlitePool,
    projeto_id: i64,
    response: &AiResponse,
) -> Result<ReconcileReport> {
    let mut report = ReconcileReport::default();

    if let Some(modificados) = &response.arquivos_modificados {
        for arquivo in modificados {
            match queries::get_file_by_name_or_path(pool, projeto_id, &arquivo.nome).await? {
                Some(existente) => {
                    queries::update_file_content(pool, existente.id, &arquivo.novo_conteudo)
                        .await?;
                    report.updated.push(arquivo.nome.clone());
                }
                None => report.skipped.push(arquivo.nome.clone()),
            }
        }
    }

    if let Some(criados) = &response.arquivos_criados {
        for novo in criados {
            queries::create_file(
                pool,
                NewFile {
                    name: novo.nome.clone(),
                    path: novo.caminho.clone(),
                    content: Some(novo.conteudo.clone()),
                    project_id: projeto_id,
                    kind: "file".into(),
                    language: Some(language::detect(&novo.nome).into()),
                    size: novo.conteudo.len() as i64,
                },
            )
            .await?;
            report.created.push(novo.nome.clone());
        }
    }

    Ok(report)
}
