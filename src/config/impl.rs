use std::sync::{Arc, OnceLock};

use super::AppConfig;

static CONFIG: OnceLock<Arc<AppConfig>> = OnceLock::new();

/// Get the global configuration if it has been initialized
pub fn try_get_config() -> Option<Arc<AppConfig>> {
    CONFIG.get().cloned()
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory and
/// `SNAPLINK__*` environment variables. Subsequent calls are no-ops.
///
/// # Examples
/// ```no_run
/// use snaplink::config::init_config;
/// init_config();
/// ```
pub fn init_config() -> Arc<AppConfig> {
    CONFIG
        .get_or_init(|| Arc::new(AppConfig::load()))
        .clone()
}
