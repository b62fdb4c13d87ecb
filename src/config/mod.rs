mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

/// Loads configuration once per process: an optional YAML file overlaid with
/// the `OPENAI_API_KEY` environment variable. A missing file falls back to
/// built-in defaults; a missing credential is carried as `None` so the server
/// can report it per request instead of refusing to start.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config: Config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => serde_yaml::from_str(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        if !api_key.is_empty() {
            config.llm.api_key = Some(api_key);
        }
    }

    Ok(config)
}
