//! Environment-driven configuration.

use serde::Deserialize;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed cross-origin endpoint for browser clients
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// A local `.env` file is honored when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(ConfigError::Env)
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable error: {0}")]
    Env(#[from] envy::Error),
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        // テスト項目: 未設定時のデフォルト値
        // when (操作):
        let config = Config::default();

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.server_address(), "0.0.0.0:5000");
    }
}
