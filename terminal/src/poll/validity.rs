use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use common::Validity;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{OverlapPolicy, UiEvent, spawn_poll_loop};
use crate::api::ContestApi;

/// Polls session validity and fires a single navigation on expiry.
///
/// Navigating ends the session, so `session` is cancelled along with the
/// loop itself.
pub fn spawn_validity_loop(
    api: Arc<dyn ContestApi>,
    events: UnboundedSender<UiEvent>,
    period: Duration,
    policy: OverlapPolicy,
    session: CancellationToken,
) -> JoinHandle<()> {
    let fired = Arc::new(AtomicBool::new(false));
    let loop_stop = session.clone();
    spawn_poll_loop("validity", period, policy, loop_stop, move || {
        let api = api.clone();
        let events = events.clone();
        let fired = fired.clone();
        let session = session.clone();
        async move {
            check_validity(api.as_ref(), &events, &fired, &session).await;
        }
    })
}

/// One validity check. Returns `None` when the request failed.
pub async fn check_validity(
    api: &dyn ContestApi,
    events: &UnboundedSender<UiEvent>,
    fired: &AtomicBool,
    session: &CancellationToken,
) -> Option<Validity> {
    let validity = match api.validity().await {
        Ok(body) => Validity::from_signal(&body),
        Err(err) => {
            warn!("Validity check failed: {}", err);
            return None;
        }
    };

    if let Some(navigation) = validity.navigation() {
        if !fired.swap(true, Ordering::AcqRel) {
            info!("Session ended ({:?}), navigating to {:?}", validity, navigation);
            let _ = events.send(UiEvent::Navigate(navigation));
            session.cancel();
        }
    }

    Some(validity)
}
