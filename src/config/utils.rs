use super::schemas::Config;
/// Configuration utilities - loading, reloading, and access helpers
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Load configuration from the default location and initialize the global CONFIG
pub fn load_config() -> Result<(), String> {
    let path = crate::paths::get_config_path();
    load_config_from_path(&path)
}

/// Parse a configuration file; a missing file yields the defaults
pub fn read_config_file(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
}

/// Load configuration from a specific file path
pub fn load_config_from_path(path: &Path) -> Result<(), String> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Reload configuration from disk, replacing the in-memory copy atomically
pub fn reload_config_from_path(path: &Path) -> Result<(), String> {
    let new_config = read_config_file(path)?;

    match CONFIG.get() {
        Some(lock) => {
            *lock.write() = new_config;
            Ok(())
        }
        None => Err("Config not initialized. Call load_config() first.".to_string()),
    }
}

/// Execute a function with read access to the configuration.
/// Falls back to defaults when nothing has been loaded (library use, tests).
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => f(&lock.read()),
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration, for use across await points
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Write the current configuration to disk as TOML
pub fn save_config(path: &Path) -> Result<(), String> {
    let contents = toml::to_string_pretty(&get_config_clone())
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.scanner.scan_interval_secs, 300);
        assert_eq!(config.webserver.port, 8080);
        assert!(!config.webserver.scan_on_empty);
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("[provider]"));
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[webserver]"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scanner]\ntoken_delay_ms = 0\n").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.scanner.token_delay_ms, 0);
        assert_eq!(config.scanner.token_timeout_secs, 30);
        assert_eq!(config.provider, Default::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scanner\n").unwrap();
        assert!(read_config_file(&path).is_err());
    }
}
