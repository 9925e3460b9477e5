use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub address: String,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("server address must not be empty".to_string());
        }
        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err("server address must start with http:// or https://".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "http://[::1]:5001".to_string(),
        }
    }
}
