//! Periodic full reparse.
//!
//! Each tick replaces the whole snapshot. Tasks from the previous snapshot
//! are stale from that moment on.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{TaskPanel, TaskSnapshot};
use crate::error::Result;
use crate::vault::Vault;

/// How often the panel reparses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSchedule {
    /// Parse once, never again.
    Disabled,
    Every(Duration),
}

impl RefreshSchedule {
    /// Interpret a millisecond interval; zero disables refreshing.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Self::Disabled
        } else {
            Self::Every(Duration::from_millis(millis))
        }
    }

    #[must_use]
    pub fn period(self) -> Option<Duration> {
        match self {
            Self::Disabled => None,
            Self::Every(period) => Some(period),
        }
    }
}

/// Reparse on the panel's schedule until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the first snapshot fails or the signal handler
/// cannot be installed.
pub async fn watch<V, F>(panel: &mut TaskPanel<V>, on_snapshot: F) -> Result<usize>
where
    V: Vault,
    F: FnMut(&TaskSnapshot),
{
    let schedule = panel.config().refresh_schedule();
    watch_until(panel, schedule, on_snapshot, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, stopping refresh");
    })
    .await
}

/// Reparse on `schedule` until `shutdown` completes.
///
/// The first snapshot is taken immediately and its failure is returned.
/// Later failures are logged and the loop keeps going. With
/// [`RefreshSchedule::Disabled`] only the first snapshot is taken.
/// Returns the number of snapshots delivered to `on_snapshot`.
///
/// # Errors
///
/// Returns an error if the first snapshot fails.
pub async fn watch_until<V, F, S>(
    panel: &mut TaskPanel<V>,
    schedule: RefreshSchedule,
    mut on_snapshot: F,
    shutdown: S,
) -> Result<usize>
where
    V: Vault,
    F: FnMut(&TaskSnapshot),
    S: Future<Output = ()>,
{
    on_snapshot(&panel.snapshot()?);
    let mut delivered = 1;

    let Some(period) = schedule.period() else {
        debug!("Refresh disabled, single snapshot taken");
        return Ok(delivered);
    };

    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => match panel.snapshot() {
                Ok(snapshot) => {
                    on_snapshot(&snapshot);
                    delivered += 1;
                }
                Err(e) => warn!("Refresh failed: {}", e),
            },
        }
    }

    Ok(delivered)
}
