use anyhow::{anyhow, Context};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use tokenboard::{
    apis::DexScreenerClient,
    arguments::{get_add_token_address, is_scan_once_enabled, is_webserver_disabled, patterns, print_help},
    config::{self, Config},
    logger::{self, LogTag},
    paths,
    scanner::{self, ScanOutcome, ScanSettings},
    service::{StorePaths, TokenBoard},
    types::Snapshot,
};

/// Main entry point for TokenBoard
///
/// Modes:
/// - `--add <address>`: register one token, print its row, exit
/// - `--scan-once`: run one scan, print the summary, exit
/// - default: periodic scanning plus the HTTP API until Ctrl-C
#[tokio::main]
async fn main() {
    if patterns::is_help_requested() {
        print_help();
        return;
    }
    if patterns::is_version_requested() {
        println!("tokenboard {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Logger needs the logs directory to exist
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();
    logger::info(
        LogTag::System,
        &format!("TokenBoard {} starting, data in {}", env!("CARGO_PKG_VERSION"), paths::get_data_directory().display()),
    );

    let result = run().await;
    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("TokenBoard failed: {:#}", e));
    }
    logger::flush();

    if result.is_err() {
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    config::load_config()
        .map_err(|e| anyhow!(e))
        .context("loading configuration")?;
    let cfg = config::get_config_clone();

    let provider = DexScreenerClient::new(&cfg.provider).map_err(|e| anyhow!(e))?;
    let settings = ScanSettings::from_config(&cfg.scanner).context("invalid [scanner] configuration")?;
    let board = Arc::new(TokenBoard::new(Arc::new(provider), settings, &StorePaths::resolve()));

    install_panic_hook();

    if let Some(address) = get_add_token_address() {
        let added = board.add_token(&address).await?;
        println!(
            "Tracking {} ({}) - volume 24h {:.2}, {} tokens tracked",
            added.row.symbol, added.row.base_address, added.row.volume_24h, added.tokens_tracked
        );
        return Ok(());
    }

    if is_scan_once_enabled() {
        match board.trigger_scan().await? {
            ScanOutcome::Completed(snapshot) => print_summary(&snapshot),
            ScanOutcome::Skipped(_) => println!("A scan is already running"),
        }
        return Ok(());
    }

    serve(board, cfg).await
}

/// Periodic scanning and the HTTP API until Ctrl-C (or a webserver failure)
async fn serve(board: Arc<TokenBoard>, cfg: Config) -> anyhow::Result<()> {
    let shutdown = Arc::new(Notify::new());

    let scan_loop = (cfg.scanner.scan_interval_secs > 0).then(|| {
        scanner::spawn_scan_loop(
            board.coordinator(),
            Duration::from_secs(cfg.scanner.scan_interval_secs),
            shutdown.clone(),
        )
    });

    let mut server = if cfg.webserver.enabled && !is_webserver_disabled() {
        spawn_webserver(board.clone(), &cfg, shutdown.clone())
    } else {
        logger::info(LogTag::System, "HTTP API disabled");
        None
    };

    let server_exit = match server.as_mut() {
        Some(handle) => tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for Ctrl-C")?;
                None
            }
            joined = handle => Some(joined),
        },
        None => {
            tokio::signal::ctrl_c().await.context("listening for Ctrl-C")?;
            None
        }
    };

    logger::warning(LogTag::System, "Shutting down");
    shutdown.notify_waiters();

    if let Some(handle) = scan_loop {
        let _ = handle.await;
    }

    let joined = match (server_exit, server) {
        (Some(joined), _) => joined,
        (None, Some(handle)) => handle.await,
        (None, None) => return Ok(()),
    };

    match joined {
        Ok(result) => result.map_err(|e| anyhow!(e)),
        Err(e) => Err(anyhow!("webserver task failed: {}", e)),
    }
}

#[cfg(feature = "web")]
fn spawn_webserver(
    board: Arc<TokenBoard>,
    cfg: &Config,
    shutdown: Arc<Notify>,
) -> Option<JoinHandle<Result<(), String>>> {
    Some(tokio::spawn(tokenboard::webserver::start_server(
        board,
        cfg.webserver.clone(),
        shutdown,
    )))
}

#[cfg(not(feature = "web"))]
fn spawn_webserver(
    _board: Arc<TokenBoard>,
    _cfg: &Config,
    _shutdown: Arc<Notify>,
) -> Option<JoinHandle<Result<(), String>>> {
    logger::warning(LogTag::System, "Built without the `web` feature, HTTP API unavailable");
    None
}

/// Panics (in any task) are logged; a panicking spawned task does not take the process down
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        logger::error(LogTag::System, &format!("Panic at {}: {}", location, info));
        logger::flush();
        if cfg!(debug_assertions) {
            default_hook(info);
        }
    }));
}

fn print_summary(snapshot: &Snapshot) {
    println!("Snapshot {} ({} tokens)", snapshot.timestamp.to_rfc3339(), snapshot.tokens_tracked);
    println!("Total 24h volume: {:.2}", snapshot.banner.volume_24h);

    if let Some(special) = &snapshot.banner_special {
        println!(
            "{}: change 24h {}, volume {:.2}",
            special.symbol,
            special.change_24h.map(|c| format!("{:+.2}%", c)).unwrap_or_else(|| "n/a".to_string()),
            special.volume_24h
        );
    }

    println!("\nTop gainers:");
    for (rank, row) in snapshot.top_gainers.iter().enumerate() {
        println!(
            "{:>3}. {:<12} {:>10}",
            rank + 1,
            row.symbol,
            row.change_24h.map(|c| format!("{:+.2}%", c)).unwrap_or_else(|| "n/a".to_string())
        );
    }

    println!("\nTop volume:");
    for (rank, row) in snapshot.top_volume.iter().enumerate() {
        println!("{:>3}. {:<12} {:>16.2}", rank + 1, row.symbol, row.volume_24h);
    }
}
