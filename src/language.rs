//! Extension→language mapping shared by file creation, the workspace bridge
//! and the editor's syntax-highlight selection.

/// Language tag used when the extension is unrecognized.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Derive a language tag from a file name.
pub fn detect(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return DEFAULT_LANGUAGE,
    };

    match ext.as_str() {
        "js" | "jsx" | "mjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "java" => "java",
        "cpp" | "cc" | "hpp" => "cpp",
        "c" | "h" => "c",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "json" => "json",
        "xml" => "xml",
        "yaml" | "yml" => "yaml",
        "md" => "markdown",
        "sql" => "sql",
        "sh" => "shell",
        "bat" => "batch",
        "toml" => "toml",
        _ => DEFAULT_LANGUAGE,
    }
}
