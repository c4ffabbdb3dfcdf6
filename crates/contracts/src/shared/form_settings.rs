use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Высота строки сетки по умолчанию, px
pub const DEFAULT_ROW_HEIGHT: f64 = 30.0;

/// Ключ пользовательских настроек страницы раскладки
pub fn local_config_key(content_type_uid: &str, order_field: &str, group_name: &str) -> String {
    format!("{}/{}/{}", content_type_uid, order_field, group_name)
}

/// Пользовательские настройки отображения одной группы
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalConfig {
    #[serde(default)]
    pub chosen_media_field: String,
    #[serde(default)]
    pub chosen_title_field: String,
    #[serde(default)]
    pub chosen_subtitle_field: String,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            chosen_media_field: String::new(),
            chosen_title_field: String::new(),
            chosen_subtitle_field: String::new(),
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl LocalConfig {
    pub fn media_field(&self) -> Option<&str> {
        Some(self.chosen_media_field.as_str()).filter(|s| !s.is_empty())
    }

    pub fn title_field(&self) -> Option<&str> {
        Some(self.chosen_title_field.as_str()).filter(|s| !s.is_empty())
    }

    pub fn subtitle_field(&self) -> Option<&str> {
        Some(self.chosen_subtitle_field.as_str()).filter(|s| !s.is_empty())
    }
}

/// Все пользовательские настройки, по ключу `{uid}/{orderField}/{groupName}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LocalSettings {
    #[serde(default)]
    pub configs: BTreeMap<String, LocalConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FormSettings {
    pub form_key: String,
    pub settings: LocalConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveSettingsResponse {
    pub success: bool,
    pub message: String,
}
