//! Client configuration validation with aggregated errors.
//! - credentials must be present
//! - base URLs must be absolute http(s) URLs

use reqwest::Url;
use tracing::{error, info};

use crate::config::settings::ClientConfig;

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_client_config(cfg: &ClientConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_not_blank("accountId", &cfg.account_id, &mut errors);
    validate_not_blank("clientId", &cfg.client_id, &mut errors);
    validate_not_blank("clientSecret", &cfg.client_secret, &mut errors);

    validate_base_url("baseURL", &cfg.base_url, &mut errors);
    validate_base_url("baseAuthURL", &cfg.base_auth_url, &mut errors);

    if let Some(logging) = &cfg.logging {
        let level = logging.level.to_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            errors.push(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                logging.level
            ));
        }
    }

    if errors.is_empty() {
        info!("client config validated");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_not_blank(name: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("config: '{}' must not be empty", name));
    }
}

fn validate_base_url(name: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "config: '{}' has unsupported scheme '{}'",
            name,
            url.scheme()
        )),
        Err(e) => errors.push(format!("config: '{}' is not a valid URL: {}", name, e)),
    }
}
