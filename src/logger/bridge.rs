/// Routes records emitted through the `log` facade (by dependencies or by
/// modules that use `log::debug!` directly) into the tagged logger.
use super::levels::LogLevel;
use super::tags::LogTag;

struct FacadeBridge;

/// Dependencies are only heard from at warning level and above
const EXTERNAL_MAX_LEVEL: log::Level = log::Level::Warn;

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
            || metadata.level() <= EXTERNAL_MAX_LEVEL
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = LogTag::from_target(record.target());
        let level = LogLevel::from(record.level());
        super::core::log_internal(tag, level, &record.args().to_string());
    }

    fn flush(&self) {
        super::file::flush_file_logging();
    }
}

/// Install the bridge as the global `log` logger. Safe to call more than once.
pub fn install() {
    if log::set_boxed_logger(Box::new(FacadeBridge)).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}
