//! Structured logging system for TokenBoard
//!
//! This module provides a clean, ergonomic logging API with:
//! - Automatic debug mode filtering from command-line arguments
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Dual output: colored console + file persistence
//! - A `log` facade bridge so dependency warnings land in the same sink
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokenboard::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Registry, "Registry file corrupt, starting empty");
//! logger::info(LogTag::Scanner, "Scan finished");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only if --debug-api
//! ```

mod bridge;
mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    get_logger_config, init_from_args, set_logger_config, update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup, after the directories exist:
/// 1. Parse command-line arguments for debug flags
/// 2. Open the log file
/// 3. Install the `log` facade bridge
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
    bridge::install();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless the threshold is raised above it)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown with --debug-<tag>
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with --verbose
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
pub fn flush() {
    file::flush_file_logging();
}
