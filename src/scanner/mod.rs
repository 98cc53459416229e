/// Scan pipeline: volume aggregation, row building, ranking, snapshot
/// building and the single-flight coordinator, plus the periodic scan loop.
pub mod builder;
pub mod coordinator;
pub mod ranking;
pub mod rows;
pub mod volume;

pub use builder::{ScanSettings, SnapshotBuilder};
pub use coordinator::{ScanCoordinator, ScanOutcome};

use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Trigger a scan every `interval` until `shutdown` is notified.
/// A tick that finds a scan in flight is skipped; a failed scan is logged and the loop goes on.
pub fn spawn_scan_loop(
    coordinator: Arc<ScanCoordinator>,
    interval: Duration,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        logger::info(
            LogTag::Scanner,
            &format!("Periodic scan every {}s", interval.as_secs()),
        );

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    logger::info(LogTag::Scanner, "Periodic scan stopping");
                    break;
                }

                _ = async {
                    tokio::time::sleep(interval).await;
                    match coordinator.run_scan().await {
                        Ok(ScanOutcome::Completed(_)) => {}
                        Ok(ScanOutcome::Skipped(_)) => {
                            logger::debug(LogTag::Scanner, "Tick skipped, scan already in flight");
                        }
                        Err(e) => logger::error(LogTag::Scanner, &format!("Periodic scan failed: {}", e)),
                    }
                } => {}
            }
        }
    })
}
