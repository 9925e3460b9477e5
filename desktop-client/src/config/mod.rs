mod main_config;
mod server_config;

pub use main_config::{get_config_manager, Config, ClientConfigManager};
pub use server_config::ServerConfig;
