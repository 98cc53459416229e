/// Logger configuration derived from command-line flags
///
/// Flags understood:
/// - `--debug-<tag>`: enable DEBUG output for one tag
/// - `--verbose`: enable DEBUG and VERBOSE output for every tag
/// - `--verbose-<tag>`: enable VERBOSE output for one tag
/// - `--quiet`: only warnings and errors
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_tags: HashSet<String>,
    pub verbose_tags: HashSet<String>,
    /// Empty set means every tag is enabled
    pub enabled_tags: HashSet<String>,
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

impl LoggerConfig {
    /// Build a configuration from a raw argument list
    pub fn from_args(args: &[String]) -> Self {
        let mut config = LoggerConfig::default();

        for arg in args {
            if arg == "--verbose" {
                config.min_level = LogLevel::Verbose;
            } else if arg == "--quiet" {
                config.min_level = LogLevel::Warning;
            } else if let Some(tag) = arg.strip_prefix("--verbose-") {
                config.verbose_tags.insert(tag.to_lowercase());
                if config.min_level < LogLevel::Verbose {
                    config.min_level = LogLevel::Verbose;
                }
            } else if let Some(tag) = arg.strip_prefix("--debug-") {
                config.debug_tags.insert(tag.to_lowercase());
                if config.min_level < LogLevel::Debug {
                    config.min_level = LogLevel::Debug;
                }
            } else if arg == "--no-log-file" {
                config.file_logging = false;
            }
        }

        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> = Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub fn update_logger_config<F: FnOnce(&mut LoggerConfig)>(f: F) {
    f(&mut LOGGER_CONFIG.write());
}

/// Configure the logger from the process arguments
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    set_logger_config(LoggerConfig::from_args(&args));
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.min_level == LogLevel::Verbose || config.debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().verbose_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_debug_flag_enables_tag() {
        let config = LoggerConfig::from_args(&args(&["tokenboard", "--debug-scanner"]));
        assert!(config.debug_tags.contains("scanner"));
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_quiet_raises_threshold() {
        let config = LoggerConfig::from_args(&args(&["tokenboard", "--quiet"]));
        assert_eq!(config.min_level, LogLevel::Warning);
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = LoggerConfig::from_args(&args(&["tokenboard"]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
        assert!(config.file_logging);
    }
}
