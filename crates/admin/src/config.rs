use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Short display name used in the status summary.
    pub server_short_name: String,
    /// Lookback window, in minutes, for the analytics boards.
    pub log_lookback_minutes: u32,
    /// Expiry applied to the stored welcome message.
    pub welcome_message_expiry_secs: u64,
    /// Expiry applied to the stored broadcast message.
    pub broadcast_message_expiry_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            server_short_name: "Game Rcon".to_string(),
            log_lookback_minutes: 180,
            welcome_message_expiry_secs: 60 * 60 * 24 * 7,
            broadcast_message_expiry_secs: 60 * 30,
        }
    }
}

impl AdminConfig {
    /// Load configuration from file or environment variables.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, AdminError> {
        let config_path = std::env::var("ADMIN_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/rcon/admin.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::default()
        };

        // Environment variables override file config
        if let Ok(name) = std::env::var("SERVER_SHORT_NAME") {
            config.server_short_name = name;
        }
        if let Ok(minutes) = std::env::var("LOG_LOOKBACK_MINUTES") {
            config.log_lookback_minutes = minutes
                .parse()
                .map_err(|_| AdminError::Config(format!("bad LOG_LOOKBACK_MINUTES: {minutes}")))?;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, AdminError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Config(format!("cannot read {path}: {e}")))?;
        toml::from_str(&contents).map_err(|e| AdminError::Config(format!("bad config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AdminConfig::default();
        assert_eq!(config.log_lookback_minutes, 180);
        assert_eq!(config.welcome_message_expiry_secs, 7 * 24 * 3600);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: AdminConfig = toml::from_str("server_short_name = \"My Server\"").unwrap();
        assert_eq!(config.server_short_name, "My Server");
        assert_eq!(config.log_lookback_minutes, 180);
    }
}
