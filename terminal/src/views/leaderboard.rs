use super::View;
use crate::app::AppCommand;
use crate::poll::UiEvent;
use common::{Badge, RenderedRow, column_headers};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use std::cell::RefCell;

pub struct LeaderboardView {
    headers: Vec<String>,
    rows: Vec<RenderedRow>,
    selected_index: usize,
    table_state: RefCell<TableState>,
    status: Option<String>,
}

impl Default for LeaderboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self {
            headers: column_headers(0),
            rows: Vec::new(),
            selected_index: 0,
            table_state: RefCell::new(TableState::default()),
            status: None,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<&RenderedRow> {
        self.rows.get(self.selected_index)
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected_index < self.rows.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    fn badge_style(badge: Option<Badge>) -> Style {
        match badge {
            Some(Badge::Diamond) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Some(Badge::Gold) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            None => Style::default(),
        }
    }

    fn build_row(row: &RenderedRow) -> Row<'_> {
        let name = match &row.removal {
            Some(_) => Line::from(vec![
                Span::styled("[x] ", Style::default().fg(Color::Red)),
                Span::raw(row.username.as_str()),
            ]),
            None => Line::from(row.username.as_str()),
        };

        let mut cells = vec![Cell::from(row.rank.to_string()), Cell::from(name)];
        cells.extend(
            row.cells
                .iter()
                .map(|cell| Cell::from(cell.text.as_str()).style(Self::badge_style(cell.badge))),
        );
        cells.push(Cell::from(row.solved.to_string()));
        cells.push(Cell::from(row.score.to_string()));
        Row::new(cells)
    }
}

impl View for LeaderboardView {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
                None
            }
            KeyCode::Char('x') => self
                .selected_row()
                .and_then(|row| row.removal.clone())
                .map(AppCommand::RemoveUser),
            KeyCode::Char('p') => Some(AppCommand::OpenProblem),
            _ => None,
        }
    }

    fn on_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Leaderboard(frame) => {
                if let Some(num_problems) = frame.num_problems {
                    self.headers = column_headers(num_problems);
                }
                self.rows = frame.rows.clone();
                self.selected_index = self.selected_index.min(self.rows.len().saturating_sub(1));
            }
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

        let title = Paragraph::new("Leaderboard")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let num_problems = self.headers.len().saturating_sub(4);
        let mut widths = vec![Constraint::Length(4), Constraint::Min(12)];
        widths.extend((0..num_problems).map(|_| Constraint::Length(9)));
        widths.push(Constraint::Length(7));
        widths.push(Constraint::Length(8));

        let header = Row::new(self.headers.iter().map(|h| Cell::from(h.as_str())))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let table = Table::new(self.rows.iter().map(Self::build_row), widths)
            .header(header)
            .block(Block::default().title(format!("{} users", self.rows.len())).borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::DarkGray));

        let mut table_state = self.table_state.borrow_mut();
        table_state.select((!self.rows.is_empty()).then_some(self.selected_index));
        frame.render_stateful_widget(table, chunks[1], &mut *table_state);

        let help_text = match &self.status {
            Some(status) => status.clone(),
            None if self.rows.iter().any(|r| r.removal.is_some()) => {
                "↑/k: Up | ↓/j: Down | x: Remove user | p: Problem | q: Quit".to_string()
            }
            None => "↑/k: Up | ↓/j: Down | p: Problem | q: Quit".to_string(),
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}
