use super::View;
use crate::app::AppCommand;
use crate::poll::UiEvent;
use common::EditorMirror;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const TAB: &str = "    ";

pub struct ProblemView {
    clock: String,
    time_up: bool,
    text: String,
    mirror: EditorMirror,
    status: Option<String>,
}

impl Default for ProblemView {
    fn default() -> Self {
        Self::new("")
    }
}

impl ProblemView {
    pub fn new(initial_code: &str) -> Self {
        Self {
            clock: "--:--".to_string(),
            time_up: false,
            text: initial_code.to_string(),
            mirror: EditorMirror::new(initial_code),
            status: None,
        }
    }

    pub fn clock(&self) -> &str {
        &self.clock
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    pub fn mirror(&self) -> &EditorMirror {
        &self.mirror
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        change(&mut self.text);
        self.mirror.on_change(&self.text);
    }

    fn is_submit(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Enter | KeyCode::Char('s'))
    }
}

impl View for ProblemView {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if Self::is_submit(&key) {
            return Some(AppCommand::Submit(self.mirror.backing().to_string()));
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('l') => Some(AppCommand::OpenLeaderboard),
                KeyCode::Char('c') => Some(AppCommand::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char(c) => {
                self.edit(|text| text.push(c));
                None
            }
            KeyCode::Enter => {
                self.edit(|text| text.push('\n'));
                None
            }
            KeyCode::Tab => {
                self.edit(|text| text.push_str(TAB));
                None
            }
            KeyCode::Backspace => {
                self.edit(|text| {
                    text.pop();
                });
                None
            }
            _ => None,
        }
    }

    fn on_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Clock(text) => self.clock = text.clone(),
            UiEvent::TimeUp => self.time_up = true,
            UiEvent::Status(message) => self.status = Some(message.clone()),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let clock_style = if self.time_up {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let mut header = vec![Span::styled(self.clock.as_str(), clock_style)];
        if self.time_up {
            header.push(Span::styled("  time's up", clock_style));
        }
        header.push(Span::styled(
            format!("   {} bytes", self.mirror.byte_len()),
            Style::default().fg(Color::Yellow),
        ));
        let title = Paragraph::new(Line::from(header))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let lines: Vec<Line> = self.text.split('\n').map(Line::from).collect();
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;
        let editor = Paragraph::new(lines)
            .block(Block::default().title("Solution").borders(Borders::ALL))
            .scroll((scroll, 0));
        frame.render_widget(editor, chunks[1]);

        let help_text = self
            .status
            .clone()
            .unwrap_or_else(|| "Ctrl+Enter/Ctrl+S: Submit | Ctrl+L: Leaderboard | Esc: Quit".to_string());
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}
