use axum::{http::StatusCode, Json};
use contracts::shared::plugin_settings::Settings;

use crate::shared::data::plugin_store::{self, SETTINGS_KEY};

const MAX_HORISONTAL_DIVISIONS: u32 = 100;

/// GET /api/group-sort/settings
pub async fn get_settings() -> Result<Json<Settings>, StatusCode> {
    let stored = plugin_store::get(SETTINGS_KEY).await.map_err(|e| {
        tracing::error!("Failed to load plugin settings: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let filled = Settings::fill_defaults(stored.unwrap_or_default());
    serde_json::from_value(filled).map(Json).map_err(|e| {
        tracing::error!("Stored plugin settings are invalid: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// PUT /api/group-sort/settings
pub async fn update_settings(Json(settings): Json<Settings>) -> Result<Json<Settings>, StatusCode> {
    if settings.horisontal_divisions == 0 || settings.horisontal_divisions > MAX_HORISONTAL_DIVISIONS {
        return Err(StatusCode::BAD_REQUEST);
    }

    let value = serde_json::to_value(&settings).map_err(|_| StatusCode::BAD_REQUEST)?;
    match plugin_store::set(SETTINGS_KEY, &value).await {
        Ok(()) => Ok(Json(settings)),
        Err(e) => {
            tracing::error!("Failed to save plugin settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
