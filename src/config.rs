use crate::core::Result;
use crate::gateway::DEFAULT_ID_FIELD;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Database-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
    pub journal_mode: Option<String>,
}

/// Gateway defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_id_field")]
    pub default_id_field: String,
}

fn default_path() -> String {
    ":memory:".to_string()
}

fn default_foreign_keys() -> bool {
    true
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_path(),
            foreign_keys: default_foreign_keys(),
            journal_mode: None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            default_id_field: default_id_field(),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = crate::core::GatewayError;

    fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// let config = tablegate::config::load_config("tablegate.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    content.parse()
}
