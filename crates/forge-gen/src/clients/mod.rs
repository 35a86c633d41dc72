//! Client registry
//!
//! Maps backend names to concrete implementations.

pub mod gemini;
pub mod mock;

use crate::client::GenerationClient;
use crate::config::ForgeConfig;
use forge_core::{ForgeError, Result};

/// Create a client by name with configuration
pub fn create_client(name: &str, config: &ForgeConfig) -> Result<Box<dyn GenerationClient>> {
    if !config.is_enabled(name) {
        return Err(ForgeError::GenerationError(format!(
            "Client '{}' is disabled in config",
            name
        )));
    }
    match name {
        "mock" => Ok(Box::new(mock::MockClient::from_config(config))),
        "gemini" => Ok(Box::new(gemini::GeminiClient::from_config(config)?)),
        _ => Err(ForgeError::GenerationError(format!(
            "Unknown client '{}'. Available: {}",
            name,
            available_clients().join(", ")
        ))),
    }
}

/// List all available client names
pub fn available_clients() -> Vec<&'static str> {
    vec!["mock", "gemini"]
}
