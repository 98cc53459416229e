/// Single-flight scan gate
///
/// At most one scan runs at a time. A caller arriving while a scan is in
/// flight does not wait: it gets the last completed snapshot straight away.
use super::builder::SnapshotBuilder;
use crate::errors::BoardResult;
use crate::logger::{self, LogTag};
use crate::storage::SnapshotStore;
use crate::types::Snapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// This call ran the scan and persisted its snapshot
    Completed(Snapshot),
    /// Another scan was in flight; carries the latest snapshot at the time, if any
    Skipped(Option<Snapshot>),
}

impl ScanOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ScanOutcome::Skipped(_))
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            ScanOutcome::Completed(snapshot) => Some(snapshot),
            ScanOutcome::Skipped(latest) => latest.as_ref(),
        }
    }

    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            ScanOutcome::Completed(snapshot) => Some(snapshot),
            ScanOutcome::Skipped(latest) => latest,
        }
    }
}

/// Clears the in-flight flag however the scan ends (success, error, panic, cancellation)
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ScanCoordinator {
    builder: SnapshotBuilder,
    snapshots: Arc<SnapshotStore>,
    in_flight: AtomicBool,
}

impl ScanCoordinator {
    pub fn new(builder: SnapshotBuilder, snapshots: Arc<SnapshotStore>) -> Self {
        Self {
            builder,
            snapshots,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn builder(&self) -> &SnapshotBuilder {
        &self.builder
    }

    /// Run a scan unless one is already running. Persist failures propagate.
    pub async fn run_scan(&self) -> BoardResult<ScanOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            logger::debug(LogTag::Scanner, "Scan already in flight, returning latest snapshot");
            return Ok(ScanOutcome::Skipped(self.snapshots.latest()));
        }
        let _in_flight = InFlight(&self.in_flight);

        let snapshot = self.builder.build_snapshot().await;
        self.snapshots.append(snapshot.clone()).await?;

        logger::info(
            LogTag::Snapshot,
            &format!(
                "Snapshot {} stored ({} gainers, {} by volume)",
                snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"),
                snapshot.top_gainers.len(),
                snapshot.top_volume.len()
            ),
        );
        Ok(ScanOutcome::Completed(snapshot))
    }
}
