use axum::{extract::Path, http::StatusCode, Json};
use chrono::Utc;
use contracts::shared::form_settings::{FormSettings, LocalConfig, SaveSettingsResponse};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Настройки отображения группы по ключу `{uid}/{orderField}/{groupName}`
pub async fn load_local_config(form_key: &str) -> anyhow::Result<Option<LocalConfig>> {
    let conn = get_connection();

    let query = r#"
        SELECT settings_json
        FROM user_form_settings
        WHERE form_key = ?
    "#;

    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            query,
            vec![form_key.into()],
        ))
        .await?;

    match row {
        Some(row) => {
            let settings_json: String = row.try_get("", "settings_json")?;
            Ok(Some(serde_json::from_str(&settings_json)?))
        }
        None => Ok(None),
    }
}

/// GET /api/group-sort/local-config/*key
pub async fn get_settings(
    Path(form_key): Path<String>,
) -> Result<Json<Option<FormSettings>>, StatusCode> {
    match load_local_config(&form_key).await {
        Ok(settings) => Ok(Json(settings.map(|settings| FormSettings { form_key, settings }))),
        Err(e) => {
            tracing::error!("Failed to load form settings {}: {}", form_key, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/group-sort/local-config/*key
pub async fn save_settings(
    Path(form_key): Path<String>,
    Json(settings): Json<LocalConfig>,
) -> Result<Json<SaveSettingsResponse>, StatusCode> {
    if !(settings.row_height.is_finite() && settings.row_height > 0.0) {
        return Ok(Json(SaveSettingsResponse {
            success: false,
            message: format!("Invalid row height: {}", settings.row_height),
        }));
    }

    let conn = get_connection();

    let settings_json = serde_json::to_string(&settings).map_err(|e| {
        tracing::error!("Failed to serialize settings: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let updated_at = Utc::now().to_rfc3339();

    let query = r#"
        INSERT INTO user_form_settings (form_key, settings_json, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(form_key) DO UPDATE SET
            settings_json = excluded.settings_json,
            updated_at = excluded.updated_at
    "#;

    match conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            query,
            vec![form_key.into(), settings_json.into(), updated_at.into()],
        ))
        .await
    {
        Ok(_) => Ok(Json(SaveSettingsResponse {
            success: true,
            message: "Settings saved successfully".to_string(),
        })),
        Err(e) => {
            tracing::error!("Failed to save form settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
