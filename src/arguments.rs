/// Centralized argument handling for TokenBoard
///
/// Command-line flags are read from one global store so any module (logger,
/// paths, main) can check them without threading the argument list around.
use crate::logger::LogTag;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    has_arg_in(&get_cmd_args(), arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    arg_value_in(&get_cmd_args(), flag)
}

fn has_arg_in(args: &[String], arg: &str) -> bool {
    args.iter().any(|a| a == arg)
}

fn arg_value_in(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

// =============================================================================
// MODE FLAGS
// =============================================================================

/// Run a single scan, print its summary and exit
pub fn is_scan_once_enabled() -> bool {
    has_arg("--scan-once")
}

/// Token to register before exiting (`--add <address>`)
pub fn get_add_token_address() -> Option<String> {
    get_arg_value("--add")
}

/// Skip the HTTP request layer even if enabled in config
pub fn is_webserver_disabled() -> bool {
    has_arg("--no-webserver")
}

pub mod patterns {
    use super::has_arg;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }
}

/// Print usage information
pub fn print_help() {
    println!("TokenBoard {}", env!("CARGO_PKG_VERSION"));
    println!("Tracks token market data and publishes ranked snapshots.\n");
    println!("USAGE:");
    println!("    tokenboard [OPTIONS]\n");
    println!("MODES:");
    println!("    --scan-once            Run one scan, print the summary and exit");
    println!("    --add <address>        Register a token and exit");
    println!("    --no-webserver         Do not start the HTTP API\n");
    println!("PATHS:");
    println!("    --config <path>        Configuration file (default: <data>/config.toml)");
    println!("    --data-dir <path>      Directory holding the JSON documents\n");
    println!("LOGGING:");
    println!("    --verbose              Everything, including verbose traces");
    println!("    --quiet                Warnings and errors only");
    println!("    --no-log-file          Console only");
    for tag in LogTag::all() {
        println!("    --debug-{:<15}Debug output for {}", tag.to_debug_key(), tag.to_plain_string());
    }
    println!("\n    -h, --help             Print this help");
    println!("    -V, --version          Print version");
}
