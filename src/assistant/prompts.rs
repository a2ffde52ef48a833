//! Fixed instructions sent to the hosted model.

/// System turn for the main chat pipeline. Fixes the assistant's capabilities
/// and the required JSON reply shape.
pub const SYSTEM_PROMPT: &str = r#"Você é um assistente de programação avançado com acesso COMPLETO ao sistema de arquivos e estrutura do projeto.

Capacidades:
- Analisar toda a estrutura do projeto
- Modificar arquivos existentes
- Criar novos arquivos e pastas
- Refatorar código em múltiplos arquivos
- Implementar funcionalidades completas
- Corrigir bugs em todo o projeto
- Otimizar performance
- Adicionar documentação

Você pode ver e editar TODOS os arquivos do projeto. Use essas informações para dar respostas precisas.

SEMPRE responda em português brasileiro.

Formato de resposta JSON:
{
  "resposta": "explicação detalhada em português",
  "codigoGerado": "código principal gerado (se aplicável)",
  "arquivosModificados": [
    {
      "nome": "nome do arquivo",
      "novoConteudo": "conteúdo COMPLETO do arquivo modificado"
    }
  ],
  "arquivosCriados": [
    {
      "nome": "nome do novo arquivo",
      "caminho": "caminho/para/arquivo",
      "conteudo": "conteúdo completo do novo arquivo"
    }
  ],
  "acoes": ["lista detalhada de ações realizadas"]
}"#;

/// System turn for `/api/ai/analyze` — structured review with a 1–10 rating.
pub fn analysis_system(language: &str) -> String {
    format!(
        "You are a senior software engineer providing code analysis. Analyze the {language} code \
         and provide structured feedback. Respond with JSON in this format: \
         {{ \"suggestions\": [\"suggestion1\"], \"improvements\": [\"improvement1\"], \
         \"issues\": [\"issue1\"], \"rating\": number_from_1_to_10 }}"
    )
}

pub fn analysis_user(code: &str, language: &str) -> String {
    format!("Please analyze this {language} code:\n\n```{language}\n{code}\n```")
}

/// System turn for `/api/ai/generate`.
pub fn generation_system(language: &str) -> String {
    format!(
        "Você é um especialista em programação {language}. Gere código limpo, bem comentado, \
         seguindo as melhores práticas e padrões modernos. Inclua comentários explicativos em \
         português."
    )
}

/// System turn for `/api/ai/explain`.
pub fn explain_system(language: &str) -> String {
    format!(
        "Você é um especialista em documentação de código. Explique o que o código {language} \
         fornecido faz, em termos claros e simples, em português brasileiro."
    )
}

/// User turn for the chat pipeline: the request wrapped around the assembled
/// project context.
pub fn build_user_prompt(mensagem: &str, contexto: &str) -> String {
    let mut prompt = format!(
        "Como assistente de programação com acesso COMPLETO ao projeto, preciso ajudar com: {mensagem}\n"
    );

    if !contexto.is_empty() {
        prompt.push_str(&format!("\nCONTEXTO COMPLETO DO PROJETO:\n{contexto}\n"));
    }

    prompt.push_str(
        "\nCom base no contexto acima, analise a solicitação e:\n\
         1. Entenda o que precisa ser feito\n\
         2. Identifique quais arquivos precisam ser modificados ou criados\n\
         3. Implemente as mudanças necessárias\n\
         4. Forneça explicações claras sobre as alterações\n\
         5. Garanta que o código funcione corretamente no contexto do projeto",
    );

    prompt
}
