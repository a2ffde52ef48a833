//! Row models and insert/update payloads.
//!
//! JSON field names stay camelCase to preserve the wire contract the browser
//! editor already speaks.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub user_id: Option<String>,
    pub language: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub content: Option<String>,
    pub project_id: i64,
    /// `file` or `folder`
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub language: Option<String>,
    pub size: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub language: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub path: String,
    pub content: Option<String>,
    pub project_id: i64,
    pub kind: String,
    pub language: Option<String>,
    pub size: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFile {
    pub name: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub size: Option<i64>,
}

/// Raw chat message row; `metadata` is stored as a JSON text column.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageRow {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub timestamp: String,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        let metadata = row
            .metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());
        Self {
            id: row.id,
            role: row.role,
            content: row.content,
            timestamp: row.timestamp,
            metadata,
        }
    }
}

/// Singleton editor settings row; `settings` holds a free-form JSON blob.
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub id: i64,
    pub theme: String,
    pub font_size: i64,
    pub auto_save: bool,
    pub language: String,
    pub settings: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: i64,
    pub theme: String,
    pub font_size: i64,
    pub auto_save: bool,
    pub language: String,
    pub settings: serde_json::Value,
}

impl From<SettingsRow> for Settings {
    fn from(row: SettingsRow) -> Self {
        let settings = row
            .settings
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| serde_json::json!({}));
        Self {
            id: row.id,
            theme: row.theme,
            font_size: row.font_size,
            auto_save: row.auto_save,
            language: row.language,
            settings,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: 1,
            theme: "dark".into(),
            font_size: 14,
            auto_save: true,
            language: "pt".into(),
            settings: serde_json::json!({}),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSettings {
    pub theme: Option<String>,
    pub font_size: Option<i64>,
    pub auto_save: Option<bool>,
    pub language: Option<String>,
    pub settings: Option<serde_json::Value>,
}
