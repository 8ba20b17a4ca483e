use std::sync::Arc;
use std::time::Duration;

use common::render_leaderboard;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{OverlapPolicy, UiEvent, spawn_poll_loop};
use crate::admin::AdminFlag;
use crate::api::ContestApi;

pub fn spawn_leaderboard_loop(
    api: Arc<dyn ContestApi>,
    admin: AdminFlag,
    events: UnboundedSender<UiEvent>,
    period: Duration,
    policy: OverlapPolicy,
    stop: CancellationToken,
) -> JoinHandle<()> {
    spawn_poll_loop("leaderboard", period, policy, stop, move || {
        let api = api.clone();
        let admin = admin.clone();
        let events = events.clone();
        async move {
            refresh_leaderboard(api.as_ref(), &admin, &events).await;
        }
    })
}

/// One leaderboard cycle. A failed fetch or a malformed snapshot sends
/// nothing, leaving whatever is on screen untouched.
pub async fn refresh_leaderboard(
    api: &dyn ContestApi,
    admin: &AdminFlag,
    events: &UnboundedSender<UiEvent>,
) -> bool {
    let snapshot = match api.scores().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!("Leaderboard refresh failed: {}", err);
            return false;
        }
    };

    // Read after the fetch so a late auth result still applies to this render.
    let frame = render_leaderboard(&snapshot, admin.current());
    debug!(
        "Rendered leaderboard with {} rows, {:?} problems",
        frame.rows.len(),
        frame.num_problems
    );
    events.send(UiEvent::Leaderboard(frame)).is_ok()
}
