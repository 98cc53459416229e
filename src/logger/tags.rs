/// Log tags identify the subsystem a message comes from.
/// Each tag can be put into debug mode with `--debug-<key>`.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Registry,
    Scanner,
    Snapshot,
    Stats,
    Webserver,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used in `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Registry => "registry".to_string(),
            LogTag::Scanner => "scanner".to_string(),
            LogTag::Snapshot => "snapshot".to_string(),
            LogTag::Stats => "stats".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uncolored label used in log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }

    /// Every named tag, for help output
    pub fn all() -> &'static [LogTag] {
        &[
            LogTag::System,
            LogTag::Config,
            LogTag::Api,
            LogTag::Registry,
            LogTag::Scanner,
            LogTag::Snapshot,
            LogTag::Stats,
            LogTag::Webserver,
        ]
    }

    /// Map a `log` crate target (module path) onto a tag
    pub fn from_target(target: &str) -> LogTag {
        let head = target.split("::").nth(1).unwrap_or(target);
        match head {
            "apis" => LogTag::Api,
            "storage" => LogTag::Registry,
            "scanner" => LogTag::Scanner,
            "webserver" => LogTag::Webserver,
            "config" => LogTag::Config,
            _ => LogTag::Other(target.split("::").next().unwrap_or(target).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_are_lowercase() {
        for tag in LogTag::all() {
            let key = tag.to_debug_key();
            assert_eq!(key, key.to_lowercase());
        }
    }

    #[test]
    fn test_from_target() {
        assert_eq!(LogTag::from_target("tokenboard::apis::dexscreener"), LogTag::Api);
        assert_eq!(LogTag::from_target("tokenboard::scanner::builder"), LogTag::Scanner);
        assert_eq!(LogTag::from_target("hyper::client"), LogTag::Other("hyper".to_string()));
    }
}
