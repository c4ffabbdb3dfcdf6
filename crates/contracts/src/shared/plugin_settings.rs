use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Глобальные настройки плагина
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub horisontal_divisions: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            horisontal_divisions: 12,
        }
    }
}

impl Settings {
    /// Дополняет сохранённые настройки значениями по умолчанию.
    /// Отсутствующие и `null` ключи заменяются, остальные сохраняются как есть.
    pub fn fill_defaults(stored: Value) -> Value {
        let mut merged = match stored {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        if let Ok(Value::Object(defaults)) = serde_json::to_value(Settings::default()) {
            for (key, default_value) in defaults {
                let missing = merged.get(&key).map_or(true, Value::is_null);
                if missing {
                    merged.insert(key, default_value);
                }
            }
        }
        Value::Object(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fill_defaults() {
        assert_eq!(Settings::fill_defaults(Value::Null), json!({ "horisontalDivisions": 12 }));
        assert_eq!(
            Settings::fill_defaults(json!({ "horisontalDivisions": 6, "extra": true })),
            json!({ "horisontalDivisions": 6, "extra": true })
        );
        assert_eq!(
            Settings::fill_defaults(json!({ "horisontalDivisions": null })),
            json!({ "horisontalDivisions": 12 })
        );
    }
}
