//! Local file-system bridge ("local folder" mode): tree listing, read,
//! write and delete of real files under a fixed root.

use crate::language;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("caminho inválido: {0}")]
    InvalidPath(String),
    #[error("arquivo ou diretório não encontrado: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One node of the recursive directory listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeEntry>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileContent {
    pub content: String,
    pub language: String,
    pub path: String,
}

pub struct Workspace {
    root: PathBuf,
}

/// Entries never exposed through the bridge.
fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules" || name == "target"
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a client-supplied path against the root. Leading slashes are
    /// tolerated; parent-dir components are rejected and the real (symlink
    /// resolved) target must stay under the root, so the bridge cannot
    /// escape the workspace.
    fn resolve(&self, rel: &str) -> Result<PathBuf, WorkspaceError> {
        let trimmed = rel.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(WorkspaceError::InvalidPath(rel.to_string()));
        }
        let candidate = Path::new(trimmed);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
        {
            return Err(WorkspaceError::InvalidPath(rel.to_string()));
        }

        let joined = self.root.join(candidate);
        let root = self.root.canonicalize()?;

        // Canonicalize the deepest existing ancestor so symlinks inside the
        // workspace cannot point the operation outside the root.
        let mut probe = joined.as_path();
        let real = loop {
            match probe.canonicalize() {
                Ok(real) => break real,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    // A dangling symlink still occupies the path entry
                    if probe.symlink_metadata().is_ok() {
                        return Err(WorkspaceError::InvalidPath(rel.to_string()));
                    }
                    probe = probe
                        .parent()
                        .ok_or_else(|| WorkspaceError::InvalidPath(rel.to_string()))?;
                }
                Err(e) => return Err(WorkspaceError::Io(e)),
            }
        };
        if !real.starts_with(&root) {
            return Err(WorkspaceError::InvalidPath(rel.to_string()));
        }

        Ok(joined)
    }

    /// Recursive listing rooted at the workspace: directories first, then
    /// files, both name-ordered; hidden entries and build output skipped.
    pub fn tree(&self) -> Result<Vec<TreeEntry>, WorkspaceError> {
        self.tree_at(&self.root, "")
    }

    fn tree_at(&self, dir: &Path, rel: &str) -> Result<Vec<TreeEntry>, WorkspaceError> {
        let mut nodes = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                continue;
            }

            let rel_path = format!("{rel}/{name}");
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                // Unreadable subtrees are skipped, not fatal
                match self.tree_at(&entry.path(), &rel_path) {
                    Ok(children) => nodes.push(TreeEntry {
                        name,
                        path: rel_path,
                        is_directory: true,
                        size: None,
                        last_modified: None,
                        children: Some(children),
                    }),
                    Err(e) => {
                        tracing::warn!("ignorando diretório ilegível {rel_path}: {e}");
                    }
                }
            } else {
                let metadata = entry.metadata()?;
                let last_modified = metadata
                    .modified()
                    .ok()
                    .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc3339());
                nodes.push(TreeEntry {
                    name,
                    path: rel_path,
                    is_directory: false,
                    size: Some(metadata.len()),
                    last_modified,
                    children: None,
                });
            }
        }

        nodes.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(nodes)
    }

    pub fn read(&self, rel: &str) -> Result<FileContent, WorkspaceError> {
        let full = self.resolve(rel)?;
        let content = fs::read_to_string(&full)
            .map_err(|e| Self::map_not_found(e, rel))?;
        Ok(FileContent {
            content,
            language: language::detect(rel).to_string(),
            path: rel.to_string(),
        })
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, rel: &str, content: &str) -> Result<(), WorkspaceError> {
        let full = self.resolve(rel)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    pub fn create_dir(&self, rel: &str) -> Result<(), WorkspaceError> {
        let full = self.resolve(rel)?;
        fs::create_dir_all(full)?;
        Ok(())
    }

    pub fn delete(&self, rel: &str) -> Result<(), WorkspaceError> {
        let full = self.resolve(rel)?;
        let metadata = fs::metadata(&full).map_err(|e| Self::map_not_found(e, rel))?;
        if metadata.is_dir() {
            fs::remove_dir_all(full)?;
        } else {
            fs::remove_file(full)?;
        }
        Ok(())
    }

    fn map_not_found(e: std::io::Error, rel: &str) -> WorkspaceError {
        if e.kind() == std::io::ErrorKind::NotFound {
            WorkspaceError::NotFound(rel.to_string())
        } else {
            WorkspaceError::Io(e)
        }
    }
}
