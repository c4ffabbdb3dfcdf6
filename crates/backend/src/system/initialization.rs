use anyhow::{Context, Result};
use contracts::shared::plugin_settings::Settings;

use crate::shared::data::plugin_store::{self, SETTINGS_KEY};

/// Дополнение сохранённых настроек плагина значениями по умолчанию
pub async fn bootstrap_plugin_settings() -> Result<()> {
    let stored = plugin_store::get(SETTINGS_KEY)
        .await
        .context("Failed to read plugin settings")?;
    let is_new = stored.is_none();

    let filled = Settings::fill_defaults(stored.clone().unwrap_or_default());
    if stored.as_ref() != Some(&filled) {
        plugin_store::set(SETTINGS_KEY, &filled)
            .await
            .context("Failed to store plugin settings")?;
        if is_new {
            tracing::info!("Plugin settings created with defaults");
        } else {
            tracing::info!("Plugin settings completed with defaults");
        }
    }
    Ok(())
}
