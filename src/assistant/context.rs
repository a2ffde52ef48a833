//! Context assembly: renders project metadata, file tree and file contents
//! into the text block prepended to the user's message.

use crate::store::models::File;
use crate::store::queries;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::types::AiRequest;

/// Character budget for inlined project file contents. Past it, remaining
/// files keep their headers but the bodies are replaced by a marker. The
/// active file and the user's selection are appended afterwards so a large
/// project cannot push the user's focus out of the prompt.
pub const MAX_CONTEXT_CHARS: usize = 48_000;

const EMPTY_FILE_MARKER: &str = "*Arquivo vazio*";
const TRUNCATED_MARKER: &str = "*Conteúdo omitido (limite de contexto atingido)*";

/// Assemble the context block for one request. Empty string when the request
/// carries no project, file or selection.
pub async fn build_context(pool: &SqlitePool, request: &AiRequest) -> Result<String> {
    build_context_with_budget(pool, request, MAX_CONTEXT_CHARS).await
}

pub async fn build_context_with_budget(
    pool: &SqlitePool,
    request: &AiRequest,
    budget: usize,
) -> Result<String> {
    let mut contexto = String::new();

    if let Some(projeto_id) = request.projeto_id {
        if let Some(projeto) = queries::get_project(pool, projeto_id).await? {
            let _ = writeln!(contexto, "\n## Projeto Atual: {}", projeto.name);
            let _ = writeln!(
                contexto,
                "Descrição: {}",
                projeto.description.as_deref().unwrap_or("Sem descrição")
            );
            let _ = writeln!(contexto, "Linguagem: {}", projeto.language);
            let _ = writeln!(contexto, "Caminho: {}", projeto.path);

            let arquivos = queries::list_files(pool, projeto_id).await?;
            if !arquivos.is_empty() {
                contexto.push_str("\n## Estrutura Completa do Projeto:\n");
                contexto.push_str(&render_tree(&arquivos));

                contexto.push_str("\n## Conteúdo dos Arquivos:\n");
                for arquivo in &arquivos {
                    let _ = writeln!(
                        contexto,
                        "\n### {} ({})",
                        arquivo.name,
                        arquivo.language.as_deref().unwrap_or(&arquivo.kind)
                    );
                    let _ = writeln!(contexto, "Caminho: {}", arquivo.path);

                    let body = render_file_body(arquivo);
                    if contexto.len() + body.len() > budget {
                        contexto.push_str(TRUNCATED_MARKER);
                        contexto.push('\n');
                    } else {
                        contexto.push_str(&body);
                    }
                }
            }
        }
    }

    if let Some(arquivo_id) = request.arquivo_id {
        if let Some(arquivo) = queries::get_file(pool, arquivo_id).await? {
            let _ = writeln!(contexto, "\n## Arquivo Atual em Edição: {}", arquivo.name);
            let _ = writeln!(contexto, "Caminho: {}", arquivo.path);
            let linguagem = arquivo.language.as_deref().unwrap_or(&arquivo.kind);
            let _ = writeln!(contexto, "Linguagem: {}", linguagem);
            let _ = writeln!(
                contexto,
                "```{}\n{}\n```",
                linguagem,
                arquivo.content.as_deref().unwrap_or("")
            );
        }
    }

    if let Some(codigo) = &request.codigo_selecionado {
        contexto.push_str("\n## Código Selecionado para Análise:\n");
        let _ = writeln!(
            contexto,
            "```{}\n{}\n```",
            request.linguagem.as_deref().unwrap_or("plaintext"),
            codigo
        );
    }

    Ok(contexto)
}

fn render_file_body(arquivo: &File) -> String {
    match arquivo.content.as_deref() {
        Some(content) => format!(
            "```{}\n{}\n```\n",
            arquivo.language.as_deref().unwrap_or("plaintext"),
            content
        ),
        None => format!("{EMPTY_FILE_MARKER}\n"),
    }
}

// ============================================================================
// Tree rendering (folder grouping by path segments)
// ============================================================================

#[derive(Default)]
struct TreeNode {
    dirs: BTreeMap<String, TreeNode>,
    files: BTreeMap<String, String>,
}

fn render_tree(arquivos: &[File]) -> String {
    let mut root = TreeNode::default();

    for arquivo in arquivos {
        let partes: Vec<&str> = arquivo.path.split('/').filter(|p| !p.is_empty()).collect();
        let mut node = &mut root;
        for pasta in partes.iter().take(partes.len().saturating_sub(1)) {
            node = node.dirs.entry((*pasta).to_string()).or_default();
        }
        let nome = partes.last().copied().unwrap_or(arquivo.name.as_str());
        node.files.insert(
            nome.to_string(),
            arquivo
                .language
                .clone()
                .unwrap_or_else(|| crate::language::DEFAULT_LANGUAGE.to_string()),
        );
    }

    let mut out = String::new();
    render_node(&root, 0, &mut out);
    out
}

fn render_node(node: &TreeNode, nivel: usize, out: &mut String) {
    let indent = "  ".repeat(nivel);
    for (nome, filho) in &node.dirs {
        let _ = writeln!(out, "{indent}📁 {nome}/");
        render_node(filho, nivel + 1, out);
    }
    for (nome, linguagem) in &node.files {
        let _ = writeln!(out, "{indent}📄 {nome} ({linguagem})");
    }
}
