use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::shared::group_order::{GroupFieldPolicy, GroupSortOptions, MissingOrderNumbering};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub group_sort: GroupSortConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GroupSortConfig {
    /// Ошибка вместо пропуска, если поле группировки отсутствует в схеме
    #[serde(default)]
    pub strict_group_field: bool,
    #[serde(default)]
    pub missing_order_numbering: MissingOrderNumbering,
}

impl GroupSortConfig {
    pub fn options(&self) -> GroupSortOptions {
        GroupSortOptions {
            group_field_policy: if self.strict_group_field {
                GroupFieldPolicy::Fail
            } else {
                GroupFieldPolicy::Skip
            },
            missing_order_numbering: self.missing_order_numbering,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/group_sort.db"

[server]
host = "0.0.0.0"
port = 3000

[group_sort]
strict_group_field = false
missing_order_numbering = "legacy"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

/// Сохранение загруженной конфигурации для обработчиков
pub fn init_config(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config has already been initialized"))
}

/// Политики группировки из конфигурации (значения по умолчанию до инициализации)
pub fn group_sort_options() -> GroupSortOptions {
    CONFIG
        .get()
        .map(|c| c.group_sort.options())
        .unwrap_or_default()
}
