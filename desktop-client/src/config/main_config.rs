use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::SnakeSettings;
use common::leaderboard::validate_player_name;
use serde::{Deserialize, Serialize};

use super::ServerConfig;

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ClientConfigManager {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    /// Last name a score was submitted under; pre-fills the game-over form.
    pub player_name: Option<String>,
    #[serde(default)]
    pub snake: SnakeSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.snake.validate()?;
        if let Some(name) = &self.player_name {
            validate_player_name(name).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};
    use common::games::snake::WallCollisionMode;

    fn get_temp_file_path() -> String {
        let random_number: u32 = rand::random();
        let file_name = format!("temp_snake_client_config_{}.yaml", random_number);
        std::env::temp_dir().join(file_name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());

        let serialized_string = serializer.serialize(&default_config).unwrap();
        content_provider.set_config_content(&serialized_string).unwrap();

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config: Config = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_manager_round_trip_with_custom_settings() {
        let config = Config {
            player_name: Some("Alice".to_string()),
            snake: SnakeSettings {
                wall_collision_mode: WallCollisionMode::Death,
                ..SnakeSettings::default()
            },
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager: ClientConfigManager = ConfigManager::from_yaml_file(file_path.clone());

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded: ClientConfigManager = ConfigManager::from_yaml_file(file_path.clone());
        assert_eq!(reloaded.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager: ClientConfigManager =
            ConfigManager::from_yaml_file("this_snake_client_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_missing_snake_section_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let content = "server:\n  address: http://localhost:5001\nplayer_name: null\n";
        let config: Config = serializer.deserialize(content).unwrap();
        assert_eq!(config.snake, SnakeSettings::default());
        assert_eq!(config.server.address, "http://localhost:5001");
    }

    #[test]
    fn test_invalid_server_address_is_rejected() {
        let config = Config {
            server: ServerConfig {
                address: "localhost:5001".to_string(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
