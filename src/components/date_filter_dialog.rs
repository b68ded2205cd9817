//! Date filter input
//!
//! Accepts a `YYYY-MM-DD` date. Submitting an empty input clears the
//! filter; anything unparseable keeps the dialog open with an error.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::DATE_FORMAT;
use crate::services::data_source::parse_date;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct DateFilterDialog {
    pub input: String,
    pub error: Option<String>,
}

impl DateFilterDialog {
    /// Prefill with the active filter
    pub fn open(&mut self, current: Option<NaiveDate>) {
        self.input = current
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        self.error = None;
    }

    fn submit(&mut self) -> Option<Action> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return Some(Action::ClearDateFilter);
        }
        match parse_date(trimmed) {
            Some(date) => {
                self.error = None;
                Some(Action::SetDateFilter(date))
            }
            None => {
                self.error = Some(format!("'{}' is not a valid date (YYYY-MM-DD)", trimmed));
                None
            }
        }
    }
}

impl Component for DateFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 46, 9);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2), Constraint::Min(3)])
            .split(popup_area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.input.clone(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Filter by Date ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(input, chunks[0]);

        let message = match self.error {
            Some(ref error) => Span::styled(format!(" {}", error), Style::default().fg(Color::Red)),
            None => Span::styled(
                " YYYY-MM-DD, leave empty to clear",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(message)), chunks[1]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}
