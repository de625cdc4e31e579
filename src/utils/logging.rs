use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{ClientConfig, LogFormat, LoggingConfig};

/// Initialize tracing from the client config, falling back to compact `info`.
///
/// The library never installs a subscriber on its own; hosts opt in here.
pub fn run(client_config: &ClientConfig) {
    let logging_config = client_config.logging.to_owned().unwrap_or_default();
    init_logging(&logging_config);
}

/// Initialize tracing with the desired config.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(cfg: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flattens fields for CRI log parsers
                .with_ansi(false);

            registry.with(layer).try_init().is_ok()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            registry.with(layer).try_init().is_ok()
        }
    }
}
