use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub kitchen: KitchenConfig,
    #[serde(default)]
    pub floor: FloorConfig,
    #[serde(default)]
    pub pos: PosConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "target/db/maks_os.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Inputs of the wait estimate shown to the till and the kitchen
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KitchenConfig {
    pub base_minutes: u32,
    pub minutes_per_batch: u32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            base_minutes: 10,
            minutes_per_batch: 5,
        }
    }
}

/// Dining room seeded on first start
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FloorConfig {
    pub tables: u32,
    pub zones: Vec<String>,
    pub seats: i32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            tables: 12,
            zones: vec!["Main".to_string()],
            seats: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PosConfig {
    pub default_service_rate: f64,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            default_service_rate: contracts::usecases::u501_pos_terminal::totals::DEFAULT_SERVICE_RATE,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/maks_os.db"

[server]
port = 3000

[kitchen]
base_minutes = 10
minutes_per_batch = 5

[floor]
tables = 12
zones = ["Main", "Window", "Terrace"]
seats = 4

[pos]
default_service_rate = 10.0
"#;

/// Load configuration from config.toml
///
/// Looks next to the executable first, then falls back to the embedded default.
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

/// Database file path; relative paths resolve against the executable directory
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

static CONFIG: once_cell::sync::OnceCell<Config> = once_cell::sync::OnceCell::new();

/// Keeps the loaded config for handlers; the first call wins.
pub fn install(config: Config) {
    let _ = CONFIG.set(config);
}

/// Installed config, or built-in defaults before `install`.
pub fn current() -> Config {
    CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/maks_os.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.floor.zones.len(), 3);
        assert_eq!(config.kitchen.minutes_per_batch, 5);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n[kitchen]\nbase_minutes = 0\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.kitchen.base_minutes, 0);
        assert_eq!(config.kitchen.minutes_per_batch, 5);
        assert_eq!(config.floor.tables, 12);
        assert_eq!(config.pos.default_service_rate, 10.0);
    }
}
