use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde_json::Value;

use super::db::get_connection;

/// Ключ глобальных настроек плагина
pub const SETTINGS_KEY: &str = "settings";

/// Значение из хранилища плагина
pub async fn get(key: &str) -> anyhow::Result<Option<Value>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value_json FROM plugin_store WHERE key = ?",
            vec![key.into()],
        ))
        .await?;

    match row {
        Some(row) => {
            let value_json: String = row.try_get("", "value_json")?;
            Ok(Some(serde_json::from_str(&value_json)?))
        }
        None => Ok(None),
    }
}

pub async fn set(key: &str, value: &Value) -> anyhow::Result<()> {
    let query = r#"
        INSERT INTO plugin_store (key, value_json, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value_json = excluded.value_json,
            updated_at = excluded.updated_at
    "#;

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            query,
            vec![
                key.into(),
                serde_json::to_string(value)?.into(),
                Utc::now().to_rfc3339().into(),
            ],
        ))
        .await?;
    Ok(())
}
