//! Periodic unbounded sync, mirroring the backend's hourly job.

use std::{future::Future, time::Duration};

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::{actions::ActionHandler, form::FormState, handler::TriggerResult};

pub const DEFAULT_SYNC_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Invokes `handler` with an empty window every `period` until `shutdown` resolves.
///
/// The first run starts immediately; ticks missed while a run is in progress are skipped.
/// Shutdown wins over a due tick. A zero `period` starts nothing.
/// Returns the number of runs started.
pub async fn run_scheduled<H, S>(handler: &H, period: Duration, shutdown: S) -> usize
where
    H: ActionHandler + ?Sized,
    S: Future<Output = ()>,
{
    if period.is_zero() {
        warn!("scheduled order sync needs a non-zero period; not starting");
        return 0;
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let form = FormState::new();
    let mut runs = 0usize;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(runs, "scheduled order sync stopped");
                return runs;
            }
            _ = ticker.tick() => {
                runs += 1;
                match handler.handle(&form).await {
                    result if result.is_success() => info!(run = runs, "scheduled order sync finished"),
                    TriggerResult::AlreadyRunning => info!(run = runs, "scheduled order sync skipped"),
                    _ => warn!(run = runs, "scheduled order sync did not complete"),
                }
            }
        }
    }
}
