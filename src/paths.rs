//! Centralized path resolution for TokenBoard
//!
//! All file and directory paths are resolved through this module so the
//! binary, the stores and the tests agree on where things live.
//!
//! ## Path Strategy
//!
//! - `$TOKENBOARD_HOME` when set
//! - otherwise the platform data directory:
//!   - **macOS**: `~/Library/Application Support/TokenBoard/`
//!   - **Windows**: `%LOCALAPPDATA%\TokenBoard\`
//!   - **Linux**: `$XDG_DATA_HOME/TokenBoard/` (fallback `~/.local/share/TokenBoard/`)
//!
//! `--data-dir <path>` replaces the data directory only.
//!
//! ## Directory Structure
//!
//! ```text
//! TokenBoard/
//! ├── data/
//! │ ├── config.toml
//! │ ├── tokens.json        (token registry)
//! │ ├── snapshots.json     (latest + rolling history)
//! │ └── token_stats.json   (deep-scan cache)
//! └── logs/
//!   └── tokenboard_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

// =============================================================================
// BASE DIRECTORY RESOLUTION
// =============================================================================

const APP_DIR: &str = "TokenBoard";

/// Environment variable overriding the base directory
pub const HOME_ENV_VAR: &str = "TOKENBOARD_HOME";

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
  if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
    return PathBuf::from(dir);
  }

  if let Some(dir) = dirs::data_local_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(dir) = dirs::data_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(home) = dirs::home_dir() {
    return home.join(APP_DIR);
  }

  PathBuf::from(APP_DIR)
}

// =============================================================================
// PRIMARY DIRECTORY ACCESSORS
// =============================================================================

/// Returns the base directory for all TokenBoard data
pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.clone()
}

/// Returns the data directory path (config and persisted JSON documents)
pub fn get_data_directory() -> PathBuf {
  match crate::arguments::get_arg_value("--data-dir") {
    Some(dir) => PathBuf::from(dir),
    None => BASE_DIRECTORY.join("data"),
  }
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
  BASE_DIRECTORY.join("logs")
}

// =============================================================================
// FILE PATHS
// =============================================================================

/// Returns the configuration file path (`--config` wins)
pub fn get_config_path() -> PathBuf {
  match crate::arguments::get_arg_value("--config") {
    Some(path) => PathBuf::from(path),
    None => get_data_directory().join("config.toml"),
  }
}

/// Token registry document
pub fn get_registry_path() -> PathBuf {
  get_data_directory().join("tokens.json")
}

/// Snapshot history document
pub fn get_snapshots_path() -> PathBuf {
  get_data_directory().join("snapshots.json")
}

/// Token stats cache document
pub fn get_token_stats_path() -> PathBuf {
  get_data_directory().join("token_stats.json")
}

// =============================================================================
// DIRECTORY MANAGEMENT
// =============================================================================

/// Creates every directory TokenBoard writes into
pub fn ensure_all_directories() -> Result<(), String> {
  for dir in [get_base_directory(), get_data_directory(), get_logs_directory()] {
    std::fs::create_dir_all(&dir)
      .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
  }
  Ok(())
}
