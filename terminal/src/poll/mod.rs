pub mod leaderboard;
pub mod timer;
pub mod validity;

pub use leaderboard::{refresh_leaderboard, spawn_leaderboard_loop};
pub use timer::spawn_timer;
pub use validity::{check_validity, spawn_validity_loop};

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use common::{LeaderboardFrame, Navigation};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Everything the background loops hand to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Leaderboard(LeaderboardFrame),
    Clock(String),
    TimeUp,
    Navigate(Navigation),
    Status(String),
}

/// How a loop treats a cycle that comes due while the previous request is
/// still outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Dispatch anyway; whichever response arrives last is what gets shown.
    #[default]
    LastResponseWins,
    /// Drop the new cycle until the outstanding one finishes.
    SkipWhileInFlight,
}

/// Runs `cycle` immediately and then every `period` until `stop` fires.
///
/// Each cycle is spawned on its own task so a slow round trip never shifts
/// the schedule. Cycles still running when `stop` fires are dropped.
pub fn spawn_poll_loop<F, Fut>(
    name: &'static str,
    period: Duration,
    policy: OverlapPolicy,
    stop: CancellationToken,
    mut cycle: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let in_flight = Arc::new(AtomicBool::new(false));
        debug!("{} loop started, period {:?}, {:?}", name, period, policy);

        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = interval.tick() => {}
            }

            if policy == OverlapPolicy::SkipWhileInFlight
                && in_flight.swap(true, Ordering::AcqRel)
            {
                debug!("{} poll still in flight, skipping cycle", name);
                continue;
            }

            let fut = cycle();
            let stop = stop.clone();
            let in_flight = in_flight.clone();
            tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = stop.cancelled() => {}
                    _ = fut => {}
                }
                in_flight.store(false, Ordering::Release);
            });
        }

        debug!("{} loop stopped", name);
    })
}
