pub mod home;
pub mod leaderboard;
pub mod problem;

pub use home::HomeView;
pub use leaderboard::LeaderboardView;
pub use problem::ProblemView;

use crate::app::AppCommand;
use crate::poll::UiEvent;
use crossterm::event::KeyEvent;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand>;
    fn on_event(&mut self, event: &UiEvent);
    fn render(&self, frame: &mut Frame);
}
