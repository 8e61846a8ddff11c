mod app_config;
pub mod loader;
pub mod paths;

pub use app_config::*;

use std::sync::OnceLock;

use crate::domain::GestureError;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize configuration system (called at startup, before logging).
///
/// A broken user override is replaced by the embedded config and returned as
/// an error so it can be logged once the subscriber is installed.
pub fn init() -> Result<(), GestureError> {
    let mut problem = None;
    APP_CONFIG.get_or_init(|| {
        let (config, error) = loader::load_config("app");
        problem = error;
        config
    });
    problem.map_or(Ok(()), Err)
}

/// Get application configuration, loading it on first use
pub fn app() -> &'static AppConfig {
    APP_CONFIG.get_or_init(|| {
        let (config, error) = loader::load_config("app");
        if let Some(e) = error {
            tracing::warn!("{}, using embedded config", e);
        }
        config
    })
}
