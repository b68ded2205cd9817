//! Record editor
//!
//! A small form over the editable fields of one record. Submitting runs
//! the same validation as the data source, so an edited record satisfies
//! every invariant a loaded one does. The identifier is not editable.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::{EventRecord, EventStatus, RecordId};
use crate::services::data_source::{DataSourceError, RawRecord};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Editable field, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Date,
    Speaker,
    Status,
}

impl EditField {
    const ALL: [EditField; 4] = [
        EditField::Name,
        EditField::Date,
        EditField::Speaker,
        EditField::Status,
    ];

    fn index(&self) -> usize {
        match self {
            EditField::Name => 0,
            EditField::Date => 1,
            EditField::Speaker => 2,
            EditField::Status => 3,
        }
    }

    fn next(&self) -> EditField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> EditField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn label(&self) -> &'static str {
        match self {
            EditField::Name => "Event",
            EditField::Date => "Date",
            EditField::Speaker => "Speaker",
            EditField::Status => "Status",
        }
    }
}

/// Field editor for one record
pub struct EditDialog {
    id: RecordId,
    pub name: String,
    pub date: String,
    pub speaker: String,
    pub status: EventStatus,
    pub focused: EditField,
    pub error: Option<String>,
}

impl Default for EditDialog {
    fn default() -> Self {
        Self {
            id: RecordId(0),
            name: String::new(),
            date: String::new(),
            speaker: String::new(),
            status: EventStatus::InProgress,
            focused: EditField::Name,
            error: None,
        }
    }
}

impl EditDialog {
    /// Load a record into the form
    pub fn load(&mut self, record: &EventRecord) {
        self.id = record.id;
        self.name = record.event_name.clone();
        self.date = record.date_label();
        self.speaker = record.speaker.clone();
        self.status = record.status;
        self.focused = EditField::Name;
        self.error = None;
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused {
            EditField::Name => Some(&mut self.name),
            EditField::Date => Some(&mut self.date),
            EditField::Speaker => Some(&mut self.speaker),
            EditField::Status => None,
        }
    }

    /// Validate the form into a replacement record
    pub fn build_record(&self) -> Result<EventRecord, String> {
        let raw = RawRecord {
            id: self.id.0,
            event_name: self.name.clone(),
            date: self.date.clone(),
            speaker: self.speaker.clone(),
            status: self.status.label().to_string(),
        };

        raw.validate().map_err(|e| match e {
            DataSourceError::EmptyName { .. } => "Event name is required".to_string(),
            DataSourceError::InvalidDate { value, .. } => {
                format!("Invalid date '{}' (use YYYY-MM-DD)", value)
            }
            other => other.to_string(),
        })
    }

    fn submit(&mut self) -> Option<Action> {
        match self.build_record() {
            Ok(record) => {
                self.error = None;
                Some(Action::SubmitEdit(record))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

impl Component for EditDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focused = self.focused.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = self.focused.prev();
                None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focused == EditField::Status =>
            {
                self.status = self.status.toggled();
                None
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 64, 17);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Fields
                Constraint::Length(1), // Error line
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let mut lines = vec![Line::from("")];
        for field in EditField::ALL {
            let is_focused = field == self.focused;
            let value = match field {
                EditField::Name => self.name.clone(),
                EditField::Date => self.date.clone(),
                EditField::Speaker => self.speaker.clone(),
                EditField::Status => format!("◀ {} ▶", self.status.label()),
            };
            let cursor = if is_focused && field != EditField::Status { "█" } else { "" };

            lines.push(Line::from(vec![
                Span::styled(
                    if is_focused { "▶ " } else { "  " },
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<9}", field.label()),
                    if is_focused {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                ),
                Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(""));
        }

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Edit Event #{} ", self.id))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(form, chunks[0]);

        if let Some(ref error) = self.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(error_line, chunks[1]);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Save  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Next field  "),
            Span::styled(" Space ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle status  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record() -> EventRecord {
        EventRecord::new(
            3,
            "Kickoff",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Ada",
            EventStatus::InProgress,
        )
    }

    #[test]
    fn test_unchanged_form_submits_same_record() {
        let mut dialog = EditDialog::default();
        dialog.load(&record());

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SubmitEdit(record())));
    }

    #[test]
    fn test_typing_edits_focused_field_and_keeps_id() {
        let mut dialog = EditDialog::default();
        dialog.load(&record());

        for c in " 2".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        // Move to speaker and replace it
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        for _ in 0..3 {
            dialog.handle_key_event(key(KeyCode::Backspace)).unwrap();
        }
        for c in "Grace".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        // Toggle status
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        let Some(Action::SubmitEdit(edited)) = action else {
            panic!("expected SubmitEdit, got {:?}", action);
        };
        assert_eq!(edited.id, RecordId(3));
        assert_eq!(edited.event_name, "Kickoff 2");
        assert_eq!(edited.speaker, "Grace");
        assert_eq!(edited.status, EventStatus::Complete);
        assert_eq!(edited.date, record().date);
    }

    #[test]
    fn test_invalid_date_blocks_submit() {
        let mut dialog = EditDialog::default();
        dialog.load(&record());
        dialog.focused = EditField::Date;
        dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap();

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert!(dialog.error.as_deref().unwrap().contains("2024-01-01x"));
    }

    #[test]
    fn test_empty_name_blocks_submit() {
        let mut dialog = EditDialog::default();
        dialog.load(&record());
        dialog.name.clear();

        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert_eq!(dialog.error.as_deref(), Some("Event name is required"));
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(EditField::Status.next(), EditField::Name);
        assert_eq!(EditField::Name.prev(), EditField::Status);
    }
}
