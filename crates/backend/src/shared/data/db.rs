use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема хранилища, создаётся при старте, если таблиц ещё нет
const SCHEMA: &[(&str, &str)] = &[
    (
        "content_types",
        r#"
        CREATE TABLE IF NOT EXISTS content_types (
            uid TEXT PRIMARY KEY NOT NULL,
            kind TEXT NOT NULL DEFAULT 'collectionType',
            display_name TEXT NOT NULL DEFAULT '',
            schema_json TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT
        );
        "#,
    ),
    (
        "documents",
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            document_id TEXT NOT NULL,
            content_type_uid TEXT NOT NULL,
            data_json TEXT NOT NULL DEFAULT '{}',
            created_at TEXT,
            updated_at TEXT,
            UNIQUE (content_type_uid, document_id)
        );
        "#,
    ),
    (
        "idx_documents_content_type",
        "CREATE INDEX IF NOT EXISTS idx_documents_content_type ON documents (content_type_uid);",
    ),
    (
        "user_form_settings",
        r#"
        CREATE TABLE IF NOT EXISTS user_form_settings (
            form_key TEXT PRIMARY KEY NOT NULL,
            settings_json TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    ),
    (
        "plugin_store",
        r#"
        CREATE TABLE IF NOT EXISTS plugin_store (
            key TEXT PRIMARY KEY NOT NULL,
            value_json TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    ),
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    apply_schema(&conn).await?;
    tracing::info!("Database schema is ready ({} objects)", SCHEMA.len());

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Создание недостающих таблиц и индексов
pub async fn apply_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", name, e))?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, DbErr, ExecResult};

    async fn memory_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let conn = Database::connect(options).await.unwrap();
        apply_schema(&conn).await.unwrap();
        conn
    }

    async fn insert_document(
        conn: &DatabaseConnection,
        uid: &str,
        document_id: &str,
    ) -> Result<ExecResult, DbErr> {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO documents (document_id, content_type_uid) VALUES (?, ?)",
            vec![document_id.into(), uid.into()],
        ))
        .await
    }

    #[tokio::test]
    async fn test_document_id_is_unique_per_content_type() {
        let conn = memory_db().await;

        assert!(insert_document(&conn, "api::a.a", "doc-1").await.is_ok());
        assert!(insert_document(&conn, "api::b.b", "doc-1").await.is_ok());
        assert!(insert_document(&conn, "api::a.a", "doc-1").await.is_err());
    }

    #[tokio::test]
    async fn test_schema_is_reapplicable() {
        let conn = memory_db().await;
        assert!(apply_schema(&conn).await.is_ok());
    }
}
