use std::sync::Arc;
use std::time::Duration;

use common::{Countdown, CountdownPolicy, CountdownTick};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::UiEvent;
use crate::api::ContestApi;

/// Fetches the remaining time once, then counts down locally every `tick`.
///
/// If the initial fetch fails the clock never starts.
pub fn spawn_timer(
    api: Arc<dyn ContestApi>,
    events: UnboundedSender<UiEvent>,
    tick: Duration,
    policy: CountdownPolicy,
    stop: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let fetched = tokio::select! {
            biased;
            _ = stop.cancelled() => return,
            fetched = api.remaining_time() => fetched,
        };
        let remaining = match fetched {
            Ok(remaining) => remaining,
            Err(err) => {
                error!("Could not fetch remaining time, timer not started: {}", err);
                return;
            }
        };
        info!("Countdown seeded with {}s ({:?})", remaining, policy);

        let mut countdown = Countdown::new(remaining, policy);
        let mut interval = tokio::time::interval(tick);
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => {
                    debug!("Timer stopped with {}s left", countdown.remaining());
                    break;
                }
                _ = interval.tick() => {}
            }

            match countdown.tick() {
                CountdownTick::Running(text) => {
                    if events.send(UiEvent::Clock(text)).is_err() {
                        break;
                    }
                }
                CountdownTick::Expired(text) => {
                    info!("Countdown reached zero");
                    let _ = events.send(UiEvent::Clock(text));
                    let _ = events.send(UiEvent::TimeUp);
                    break;
                }
            }
        }
    })
}
