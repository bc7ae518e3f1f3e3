//! API server configuration

use serde::{Deserialize, Serialize};
use std::env;

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// SQLite database file path (created on first startup if absent)
    pub database_path: String,

    /// Directory of static UI assets
    pub ui_dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: "./database.db".to_string(),
            ui_dir: "ui".to_string(),
        }
    }
}

impl ApiConfig {
    /// Build a config from the defaults with METER_* environment overrides
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("METER_HOST").unwrap_or(defaults.host),
            port: env::var("METER_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            database_path: env::var("METER_DATABASE").unwrap_or(defaults.database_path),
            ui_dir: env::var("METER_UI_DIR").unwrap_or(defaults.ui_dir),
        }
    }
}
