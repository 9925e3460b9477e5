use std::net::SocketAddr;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "leaderboard_server_config.yaml";

pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or(CONFIG_FILE_NAME))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_address: String,
    /// HTTP JSON API; disabled when absent.
    pub web_address: Option<String>,
    pub max_entries: usize,
}

impl ServerConfig {
    pub fn grpc_socket_addr(&self) -> Result<SocketAddr, String> {
        self.grpc_address
            .parse()
            .map_err(|e| format!("invalid grpc_address {}: {}", self.grpc_address, e))
    }

    pub fn web_socket_addr(&self) -> Result<Option<SocketAddr>, String> {
        self.web_address
            .as_ref()
            .map(|address| {
                address
                    .parse()
                    .map_err(|e| format!("invalid web_address {}: {}", address, e))
            })
            .transpose()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            grpc_address: "[::1]:5001".to_string(),
            web_address: Some("0.0.0.0:5000".to_string()),
            max_entries: 10,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.grpc_socket_addr()?;
        self.web_socket_addr()?;
        if self.max_entries == 0 {
            return Err("max_entries must be greater than 0".to_string());
        }
        if self.max_entries > 1000 {
            return Err("max_entries must not exceed 1000".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::ConfigSerializer;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = ServerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let text = serializer.serialize(&config).unwrap();
        let parsed: ServerConfig = serializer.deserialize(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_web_server_can_be_disabled() {
        let config = ServerConfig {
            web_address: None,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.web_socket_addr().unwrap(), None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_address = ServerConfig {
            grpc_address: "localhost".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad_address.validate().is_err());

        let no_entries = ServerConfig {
            max_entries: 0,
            ..ServerConfig::default()
        };
        assert!(no_entries.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let manager = get_config_manager(Some("no_such_leaderboard_config.yaml"));
        assert_eq!(manager.get_config().unwrap(), ServerConfig::default());
    }
}
