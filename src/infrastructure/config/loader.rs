use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::paths::config_dir;
use crate::domain::GestureError;

// Embed the entire configs directory at compile time
static CONFIGS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/configs");

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

/// Parse YAML from string
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Load embedded configuration by name from the configs directory
pub fn load_embedded_config<T: DeserializeOwned + Default>(name: &str) -> T {
    let file_name = format!("{}.yaml", name);

    let Some(file) = CONFIGS_DIR.get_file(&file_name) else {
        tracing::warn!("Embedded config {} not found, using defaults", name);
        return T::default();
    };
    let Some(content) = file.contents_utf8() else {
        tracing::error!("Embedded config {} is not valid UTF-8", name);
        return T::default();
    };

    match parse_yaml::<T>(content) {
        Ok(config) => {
            tracing::debug!("Loaded embedded config: {}", name);
            config
        }
        Err(e) => {
            tracing::error!("Failed to parse embedded config {}: {}", name, e);
            T::default()
        }
    }
}

/// Load a user override file, `Ok(None)` when it does not exist
pub fn load_user_config_at<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Option<T>, GestureError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    load_yaml::<T>(path)
        .map(Some)
        .map_err(|e| GestureError::Config(format!("failed to parse {:?}: {}", path, e)))
}

/// Load `<name>.yaml` from the user config directory
pub fn load_user_config<T: DeserializeOwned>(name: &str) -> Result<Option<T>, GestureError> {
    load_user_config_at(config_dir().join(format!("{}.yaml", name)))
}

/// Load `<name>.yaml`, preferring the user copy over the embedded one.
///
/// A broken user file still yields the embedded config; the error is returned
/// alongside so the caller can report it once logging is up.
pub fn load_config<T: DeserializeOwned + Default>(name: &str) -> (T, Option<GestureError>) {
    match load_user_config(name) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (load_embedded_config(name), None),
        Err(e) => (load_embedded_config(name), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;

    #[test]
    fn test_embedded_app_config() {
        let config: AppConfig = load_embedded_config("app");
        assert_eq!(config.surface.channel_capacity, 64);
        assert_eq!(config.signal_bus.capacity, 256);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = parse_yaml("signal_bus:\n  capacity: 8\n").unwrap();
        assert_eq!(config.signal_bus.capacity, 8);
        assert_eq!(config.surface.channel_capacity, 64);
        assert!(!config.logging.production);
    }

    #[test]
    fn test_user_config_errors() {
        let dir = std::env::temp_dir().join(format!("touch-gestures-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = load_user_config_at::<AppConfig>(dir.join("missing.yaml")).unwrap();
        assert!(missing.is_none());

        let valid = dir.join("valid.yaml");
        std::fs::write(&valid, "surface:\n  channel_capacity: 4\n").unwrap();
        let config = load_user_config_at::<AppConfig>(&valid).unwrap().unwrap();
        assert_eq!(config.surface.channel_capacity, 4);

        let broken = dir.join("broken.yaml");
        std::fs::write(&broken, "surface: [not, a, mapping\n").unwrap();
        let result = load_user_config_at::<AppConfig>(&broken);
        assert!(matches!(result, Err(GestureError::Config(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_embedded_config_defaults() {
        let config: AppConfig = load_embedded_config("does_not_exist");
        assert_eq!(config.signal_bus.capacity, 256);
    }
}
