//! Row detail dialog
//!
//! Shows every field of the selected record and offers the three row
//! actions: edit, delete, and mark complete.

use super::table::status_style;
use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::{EventRecord, RecordId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Detail view for one record
#[derive(Default)]
pub struct DetailDialog {
    record_id: Option<RecordId>,
}

impl DetailDialog {
    pub fn set_record(&mut self, id: RecordId) {
        self.record_id = Some(id);
    }

    pub fn draw_with_record(&mut self, frame: &mut Frame, area: Rect, record: &EventRecord) -> Result<()> {
        let popup_area = centered_popup(area, 60, 13);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let label = |text: &'static str| {
            Span::styled(format!("{:<10}", text), Style::default().fg(Color::DarkGray))
        };

        let content = vec![
            Line::from(""),
            Line::from(vec![
                label("Event"),
                Span::styled(
                    record.event_name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("Date"),
                Span::styled(record.date_label(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                label("Speaker"),
                Span::styled(record.speaker.clone(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                label("Status"),
                Span::styled(
                    format!("{} {}", record.status.icon(), record.status.label()),
                    status_style(record.status).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("ID"),
                Span::styled(record.id.to_string(), Style::default().fg(Color::DarkGray)),
            ]),
        ];

        let details = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Event Details ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
        frame.render_widget(details, chunks[0]);

        let mut help = vec![
            Span::styled(" e ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Edit  "),
            Span::styled(" d ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("Delete  "),
        ];
        if !record.is_complete() {
            help.push(Span::styled(
                " c ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
            help.push(Span::raw("Mark complete  "));
        }
        help.push(Span::styled(
            " Esc ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        help.push(Span::raw("Close"));

        let help_bar = Paragraph::new(Line::from(help))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help_bar, chunks[1]);

        Ok(())
    }
}

impl Component for DetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::StartEdit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RequestDelete),
            KeyCode::Char('c') => self.record_id.map(Action::MarkComplete),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // The record is borrowed from the session; see draw_with_record
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_detail_keys() {
        let mut dialog = DetailDialog::default();
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('c'))).unwrap(), None);

        dialog.set_record(RecordId(8));
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::MarkComplete(RecordId(8)))
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('e'))).unwrap(),
            Some(Action::StartEdit)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::RequestDelete)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
