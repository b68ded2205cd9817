//! Status filter dialog component
//!
//! Lists "All statuses" followed by every status. Enter applies the
//! highlighted choice.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::EventStatus;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Status filter dialog
pub struct StatusFilterDialog {
    /// Highlighted option; 0 is "All statuses"
    pub selected_index: usize,
    pub list_state: ListState,
    /// Filter active when the dialog was opened
    pub current: Option<EventStatus>,
}

impl Default for StatusFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            current: None,
        }
    }

    /// Reset the highlight to the active filter
    pub fn open(&mut self, current: Option<EventStatus>) {
        self.current = current;
        self.selected_index = current
            .and_then(|s| EventStatus::all().iter().position(|o| *o == s))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// The highlighted status (None means clear the filter)
    pub fn selected_status(&self) -> Option<EventStatus> {
        if self.selected_index == 0 {
            None
        } else {
            EventStatus::all().get(self.selected_index - 1).copied()
        }
    }

    fn select_next(&mut self) {
        if self.selected_index < EventStatus::all().len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for StatusFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('s') => Some(Action::CloseModal),
            KeyCode::Enter => match self.selected_status() {
                Some(status) => Some(Action::SetStatusFilter(status)),
                None => Some(Action::ClearStatusFilter),
            },
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 40, 12);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = match self.current {
            Some(status) => format!("Current: {}", status.label()),
            None => "No filter active".to_string(),
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter by Status ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let marker = |active: bool| {
            Span::styled(if active { "● " } else { "  " }, Style::default().fg(Color::Green))
        };

        let mut items = vec![ListItem::new(Line::from(vec![
            marker(self.current.is_none()),
            Span::styled("All statuses", Style::default().fg(Color::DarkGray)),
        ]))];
        for status in EventStatus::all() {
            items.push(ListItem::new(Line::from(vec![
                marker(self.current == Some(status)),
                Span::styled(
                    format!("{} {}", status.icon(), status.label()),
                    Style::default().fg(Color::White),
                ),
            ])));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}
