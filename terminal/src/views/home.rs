use super::View;
use crate::app::AppCommand;
use crate::poll::UiEvent;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Landing screen after the server ends the session.
#[derive(Default)]
pub struct HomeView;

impl View for HomeView {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('l') => Some(AppCommand::OpenLeaderboard),
            _ => None,
        }
    }

    fn on_event(&mut self, _event: &UiEvent) {}

    fn render(&self, frame: &mut Frame) {
        let lines = vec![
            Line::from("Your contest session has ended."),
            Line::from(""),
            Line::from("l: Leaderboard | q: Quit").style(Style::default().fg(Color::DarkGray)),
        ];
        let home = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Home").borders(Borders::ALL));
        frame.render_widget(home, frame.area());
    }
}
