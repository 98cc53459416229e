//! TOML configuration for TokenBoard
//!
//! Load once at startup with [`load_config`] (or [`load_config_from_path`]),
//! then read anywhere with [`with_config`] / [`get_config_clone`].

#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, ProviderConfig, ScannerConfig, WebserverConfig};
pub use utils::{
    get_config_clone, load_config, load_config_from_path, read_config_file,
    reload_config_from_path, save_config, with_config, CONFIG,
};
