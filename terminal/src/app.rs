use std::sync::Arc;

use anyhow::Result;
use common::{Navigation, RemovalControl, utf8_byte_len};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::admin::AdminFlag;
use crate::api::ContestApi;
use crate::config::{ClientConfig, StartView};
use crate::poll::{UiEvent, spawn_leaderboard_loop, spawn_timer, spawn_validity_loop};
use crate::views::{HomeView, LeaderboardView, ProblemView, View};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Quit,
    OpenLeaderboard,
    OpenProblem,
    RemoveUser(RemovalControl),
    Submit(String),
}

pub enum AppState {
    Leaderboard(Box<LeaderboardView>),
    Problem(Box<ProblemView>),
    Home(HomeView),
}

impl AppState {
    fn view(&self) -> &dyn View {
        match self {
            AppState::Leaderboard(view) => &**view,
            AppState::Problem(view) => &**view,
            AppState::Home(view) => view,
        }
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match self {
            AppState::Leaderboard(view) => &mut **view,
            AppState::Problem(view) => &mut **view,
            AppState::Home(view) => view,
        }
    }
}

/// Owns the visible view and the background loops feeding it.
///
/// Every view runs inside a session whose loops stop when the session token
/// is cancelled. Switching views always tears the previous session down.
/// Each session gets its own event channel, so anything an old session
/// queued before teardown is dropped with its receiver.
pub struct App {
    pub state: AppState,
    config: ClientConfig,
    api: Arc<dyn ContestApi>,
    admin: AdminFlag,
    events: UnboundedSender<UiEvent>,
    receiver: UnboundedReceiver<UiEvent>,
    session: CancellationToken,
}

impl App {
    pub fn new(
        config: ClientConfig,
        api: Arc<dyn ContestApi>,
        admin: AdminFlag,
    ) -> Self {
        let (events, receiver) = mpsc::unbounded_channel();
        Self {
            state: AppState::Home(HomeView),
            config,
            api,
            admin,
            events,
            receiver,
            session: CancellationToken::new(),
        }
    }

    /// Opens the configured start view. Must run inside a tokio runtime.
    pub fn start(&mut self) {
        match self.config.start_view {
            StartView::Leaderboard => self.open_leaderboard(),
            StartView::Problem => self.open_problem(),
        }
    }

    pub fn session(&self) -> &CancellationToken {
        &self.session
    }

    fn new_session(&mut self) -> CancellationToken {
        self.session.cancel();
        self.session = CancellationToken::new();
        let (events, receiver) = mpsc::unbounded_channel();
        self.events = events;
        self.receiver = receiver;
        self.session.clone()
    }

    /// Next event from the current session. Never yields `None` while the
    /// app is alive, since the app keeps a sender for every session.
    pub async fn next_event(&mut self) -> Option<UiEvent> {
        self.receiver.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<UiEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn open_leaderboard(&mut self) {
        let session = self.new_session();
        self.state = AppState::Leaderboard(Box::new(LeaderboardView::new()));
        spawn_leaderboard_loop(
            self.api.clone(),
            self.admin.clone(),
            self.events.clone(),
            self.config.leaderboard_interval,
            self.config.overlap,
            session,
        );
        info!("Opened leaderboard");
    }

    pub fn open_problem(&mut self) {
        let session = self.new_session();
        self.state = AppState::Problem(Box::new(ProblemView::default()));
        spawn_timer(
            self.api.clone(),
            self.events.clone(),
            self.config.countdown_tick,
            self.config.countdown,
            session.clone(),
        );
        spawn_validity_loop(
            self.api.clone(),
            self.events.clone(),
            self.config.validity_interval,
            self.config.overlap,
            session,
        );
        info!("Opened problem view");
    }

    pub fn open_home(&mut self) {
        self.new_session();
        self.state = AppState::Home(HomeView);
        info!("Opened home");
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Home => self.open_home(),
            Navigation::Leaderboard => self.open_leaderboard(),
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        self.state.view_mut().handle_input(key)
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Navigate(navigation) => self.navigate(navigation),
            event => self.state.view_mut().on_event(&event),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        self.state.view().render(frame);
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenLeaderboard => self.open_leaderboard(),
            AppCommand::OpenProblem => self.open_problem(),
            AppCommand::RemoveUser(control) => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    match api.remove_user(&control).await {
                        Ok(()) => info!("Requested removal of {}", control.field),
                        Err(err) => warn!("Removal of {} failed: {}", control.field, err),
                    }
                });
            }
            AppCommand::Submit(code) => {
                let api = self.api.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let status = match api.submit(&code).await {
                        Ok(()) => format!("Submitted {} bytes", utf8_byte_len(&code)),
                        Err(err) => {
                            warn!("Submission failed: {}", err);
                            format!("Submission failed: {}", err)
                        }
                    };
                    let _ = events.send(UiEvent::Status(status));
                });
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
