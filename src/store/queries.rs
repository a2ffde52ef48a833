//! CRUD queries. Plain `query_as` with runtime binding so the crate builds
//! without a prepared database.

use super::models::*;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

// ============================================================================
// Projects
// ============================================================================

pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<Project>> {
    let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(projects)
}

pub async fn get_project(pool: &SqlitePool, id: i64) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(project)
}

pub async fn create_project(pool: &SqlitePool, project: NewProject) -> Result<Project> {
    let id = sqlx::query(
        r#"
        INSERT INTO projects (name, description, path, language)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&project.name)
    .bind(&project.description)
    .bind(&project.path)
    .bind(&project.language)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_project(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("project {id} vanished after insert"))
}

pub async fn update_project(
    pool: &SqlitePool,
    id: i64,
    update: UpdateProject,
) -> Result<Option<Project>> {
    sqlx::query(
        r#"
        UPDATE projects SET
            name = COALESCE(?1, name),
            description = COALESCE(?2, description),
            path = COALESCE(?3, path),
            language = COALESCE(?4, language),
            is_active = COALESCE(?5, is_active),
            updated_at = datetime('now')
        WHERE id = ?6
        "#,
    )
    .bind(&update.name)
    .bind(&update.description)
    .bind(&update.path)
    .bind(&update.language)
    .bind(update.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    get_project(pool, id).await
}

/// Deletes the project; its files go with it (ON DELETE CASCADE).
pub async fn delete_project(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Files
// ============================================================================

pub async fn list_files(pool: &SqlitePool, project_id: i64) -> Result<Vec<File>> {
    let files =
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE project_id = ?1 ORDER BY path")
            .bind(project_id)
            .fetch_all(pool)
            .await?;
    Ok(files)
}

pub async fn get_file(pool: &SqlitePool, id: i64) -> Result<Option<File>> {
    let file = sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(file)
}

/// Lookup used by the reconciler: the model refers to files by name or path.
pub async fn get_file_by_name_or_path(
    pool: &SqlitePool,
    project_id: i64,
    needle: &str,
) -> Result<Option<File>> {
    let file = sqlx::query_as::<_, File>(
        "SELECT * FROM files WHERE project_id = ?1 AND (name = ?2 OR path = ?2) LIMIT 1",
    )
    .bind(project_id)
    .bind(needle)
    .fetch_optional(pool)
    .await?;
    Ok(file)
}

pub async fn create_file(pool: &SqlitePool, file: NewFile) -> Result<File> {
    let id = sqlx::query(
        r#"
        INSERT INTO files (name, path, content, project_id, type, language, size)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&file.name)
    .bind(&file.path)
    .bind(&file.content)
    .bind(file.project_id)
    .bind(&file.kind)
    .bind(&file.language)
    .bind(file.size)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_file(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("file {id} vanished after insert"))
}

pub async fn update_file(pool: &SqlitePool, id: i64, update: UpdateFile) -> Result<Option<File>> {
    sqlx::query(
        r#"
        UPDATE files SET
            name = COALESCE(?1, name),
            path = COALESCE(?2, path),
            content = COALESCE(?3, content),
            language = COALESCE(?4, language),
            size = COALESCE(?5, size),
            updated_at = datetime('now')
        WHERE id = ?6
        "#,
    )
    .bind(&update.name)
    .bind(&update.path)
    .bind(&update.content)
    .bind(&update.language)
    .bind(update.size)
    .bind(id)
    .execute(pool)
    .await?;

    get_file(pool, id).await
}

/// Overwrite a file's content and recompute its size.
pub async fn update_file_content(pool: &SqlitePool, id: i64, content: &str) -> Result<()> {
    sqlx::query(
        "UPDATE files SET content = ?1, size = ?2, updated_at = datetime('now') WHERE id = ?3",
    )
    .bind(content)
    .bind(content.len() as i64)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_file(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM files WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Chat history
// ============================================================================

pub async fn list_chat_messages(pool: &SqlitePool) -> Result<Vec<ChatMessage>> {
    let rows = sqlx::query_as::<_, ChatMessageRow>("SELECT * FROM chat_messages ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(ChatMessage::from).collect())
}

pub async fn create_chat_message(
    pool: &SqlitePool,
    role: &str,
    content: &str,
    metadata: Option<&serde_json::Value>,
) -> Result<ChatMessage> {
    let metadata_text = metadata.map(|m| m.to_string());
    let id = sqlx::query("INSERT INTO chat_messages (role, content, metadata) VALUES (?1, ?2, ?3)")
        .bind(role)
        .bind(content)
        .bind(metadata_text)
        .execute(pool)
        .await?
        .last_insert_rowid();

    let row = sqlx::query_as::<_, ChatMessageRow>("SELECT * FROM chat_messages WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(row.into())
}

pub async fn clear_chat_messages(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM chat_messages").execute(pool).await?;
    Ok(())
}

// ============================================================================
// Settings (singleton row, id = 1)
// ============================================================================

pub async fn get_settings(pool: &SqlitePool) -> Result<Option<Settings>> {
    let row = sqlx::query_as::<_, SettingsRow>("SELECT * FROM settings WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Settings::from))
}

pub async fn upsert_settings(pool: &SqlitePool, update: UpdateSettings) -> Result<Settings> {
    let defaults = Settings::default();
    let settings_text = update.settings.as_ref().map(|s| s.to_string());

    sqlx::query(
        r#"
        INSERT INTO settings (id, theme, font_size, auto_save, language, settings)
        VALUES (1, ?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(id) DO UPDATE SET
            theme = COALESCE(?6, theme),
            font_size = COALESCE(?7, font_size),
            auto_save = COALESCE(?8, auto_save),
            language = COALESCE(?9, language),
            settings = COALESCE(?10, settings)
        "#,
    )
    .bind(update.theme.clone().unwrap_or(defaults.theme))
    .bind(update.font_size.unwrap_or(defaults.font_size))
    .bind(update.auto_save.unwrap_or(defaults.auto_save))
    .bind(update.language.clone().unwrap_or(defaults.language))
    .bind(settings_text.clone())
    .bind(&update.theme)
    .bind(update.font_size)
    .bind(update.auto_save)
    .bind(&update.language)
    .bind(settings_text)
    .execute(pool)
    .await?;

    get_settings(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("settings row vanished after upsert"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    async fn seeded_store() -> (Store, Project) {
        let store = Store::open_in_memory().await.unwrap();
        let project = create_project(
            store.pool(),
            NewProject {
                name: "Demo".into(),
                description: Some("projeto de teste".into()),
                path: "/projetos/demo".into(),
                language: "javascript".into(),
            },
        )
        .await
        .unwrap();
        (store, project)
    }

    #[tokio::test]
    async fn test_project_crud_roundtrip() {
        let (store, project) = seeded_store().await;
        assert_eq!(project.name, "Demo");
        assert!(project.is_active);

        let fetched = get_project(store.pool(), project.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, project.id);

        let updated = update_project(
            store.pool(),
            project.id,
            UpdateProject {
                name: Some("Renomeado".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.name, "Renomeado");
        // Untouched fields survive a partial update
        assert_eq!(updated.path, "/projetos/demo");

        assert!(delete_project(store.pool(), project.id).await.unwrap());
        assert!(get_project(store.pool(), project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_files_scoped_to_project() {
        let (store, project) = seeded_store().await;
        let other = create_project(
            store.pool(),
            NewProject {
                name: "Outro".into(),
                description: None,
                path: "/projetos/outro".into(),
                language: "python".into(),
            },
        )
        .await
        .unwrap();

        for (pid, name) in [(project.id, "a.js"), (project.id, "b.js"), (other.id, "c.py")] {
            create_file(
                store.pool(),
                NewFile {
                    name: name.into(),
                    path: format!("/{name}"),
                    content: Some("x=1".into()),
                    project_id: pid,
                    kind: "file".into(),
                    language: None,
                    size: 3,
                },
            )
            .await
            .unwrap();
        }

        let files = list_files(store.pool(), project.id).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.project_id == project.id));
    }

    #[tokio::test]
    async fn test_delete_project_cascades_to_files() {
        let (store, project) = seeded_store().await;
        let file = create_file(
            store.pool(),
            NewFile {
                name: "index.js".into(),
                path: "/index.js".into(),
                content: None,
                project_id: project.id,
                kind: "file".into(),
                language: Some("javascript".into()),
                size: 0,
            },
        )
        .await
        .unwrap();

        delete_project(store.pool(), project.id).await.unwrap();
        assert!(get_file(store.pool(), file.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_lookup_by_name_or_path() {
        let (store, project) = seeded_store().await;
        create_file(
            store.pool(),
            NewFile {
                name: "index.js".into(),
                path: "/src/index.js".into(),
                content: Some("console.log(1)".into()),
                project_id: project.id,
                kind: "file".into(),
                language: Some("javascript".into()),
                size: 14,
            },
        )
        .await
        .unwrap();

        let by_name = get_file_by_name_or_path(store.pool(), project.id, "index.js")
            .await
            .unwrap();
        assert!(by_name.is_some());

        let by_path = get_file_by_name_or_path(store.pool(), project.id, "/src/index.js")
            .await
            .unwrap();
        assert!(by_path.is_some());

        let missing = get_file_by_name_or_path(store.pool(), project.id, "nope.js")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_file_content_recomputes_size() {
        let (store, project) = seeded_store().await;
        let file = create_file(
            store.pool(),
            NewFile {
                name: "a.js".into(),
                path: "/a.js".into(),
                content: Some("old".into()),
                project_id: project.id,
                kind: "file".into(),
                language: None,
                size: 3,
            },
        )
        .await
        .unwrap();

        update_file_content(store.pool(), file.id, "console.log(1)")
            .await
            .unwrap();
        let updated = get_file(store.pool(), file.id).await.unwrap().unwrap();
        assert_eq!(updated.content.as_deref(), Some("console.log(1)"));
        assert_eq!(updated.size, "console.log(1)".len() as i64);
    }

    #[tokio::test]
    async fn test_chat_history_append_and_clear() {
        let store = Store::open_in_memory().await.unwrap();
        create_chat_message(store.pool(), "user", "oi", None)
            .await
            .unwrap();
        let with_meta = create_chat_message(
            store.pool(),
            "assistant",
            "olá!",
            Some(&serde_json::json!({"acoes": ["nenhuma"]})),
        )
        .await
        .unwrap();
        assert_eq!(with_meta.metadata.unwrap()["acoes"][0], "nenhuma");

        let messages = list_chat_messages(store.pool()).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");

        clear_chat_messages(store.pool()).await.unwrap();
        assert!(list_chat_messages(store.pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_upsert_is_partial() {
        let store = Store::open_in_memory().await.unwrap();
        assert!(get_settings(store.pool()).await.unwrap().is_none());

        let first = upsert_settings(
            store.pool(),
            UpdateSettings {
                theme: Some("light".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(first.theme, "light");
        assert_eq!(first.font_size, 14);

        let second = upsert_settings(
            store.pool(),
            UpdateSettings {
                font_size: Some(18),
                settings: Some(serde_json::json!({"editor": {"wordWrap": "on"}})),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        // Earlier partial update survives
        assert_eq!(second.theme, "light");
        assert_eq!(second.font_size, 18);
        assert_eq!(second.settings["editor"]["wordWrap"], "on");
    }
}
