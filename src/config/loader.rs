use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::{debug, error};

use crate::config::settings::ClientConfig;
use crate::config::validator;

/// Load and validate client config from a YAML file
pub async fn from_file(path: &Path) -> Result<ClientConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("failed to read config '{}': {}", path.display(), e))?;
    from_yaml_str(&content)
}

pub fn from_yaml_str(content: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(content).inspect_err(|e| {
        error!("parse config error: {}", e);
    })?;

    debug!("validation config ...");
    validator::validate_client_config(&config)
        .map_err(|errors| anyhow!("Invalid config: {}", errors.join("; ")))?;

    Ok(config)
}
