//! Event table component
//!
//! Renders one page of records with headers, status badges, and
//! expandable rows. Owns the highlight cursor and the set of expanded
//! rows, and maps mouse clicks back to record ids.

use crate::action::Action;
use crate::component::Component;
use crate::model::record::{EventRecord, EventStatus, RecordId};
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use std::collections::HashSet;

/// Terminals narrower than this get the two-column layout
const COMPACT_WIDTH: u16 = 70;

/// Column set used for the current terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Event, Date, Speaker, Status
    Full,
    /// Event and Status only; expand a row to see the rest
    Compact,
}

impl TableMode {
    pub fn for_width(width: u16) -> TableMode {
        if width < COMPACT_WIDTH {
            TableMode::Compact
        } else {
            TableMode::Full
        }
    }
}

pub fn status_style(status: EventStatus) -> Style {
    match status {
        EventStatus::Complete => Style::default().fg(Color::Green),
        EventStatus::InProgress => Style::default().fg(Color::Blue),
    }
}

fn status_cell(status: EventStatus) -> Cell<'static> {
    Cell::from(Span::styled(
        format!("{} {}", status.icon(), status.label()),
        status_style(status).add_modifier(Modifier::BOLD),
    ))
}

/// Build a table row, with a second detail line when expanded
pub fn build_row(record: &EventRecord, mode: TableMode, expanded: bool) -> Row<'static> {
    let mut name_lines = vec![Line::from(Span::styled(
        record.event_name.clone(),
        Style::default().fg(Color::White),
    ))];
    if expanded {
        name_lines.push(Line::from(vec![
            Span::styled("  Speaker: ", Style::default().fg(Color::DarkGray)),
            Span::styled(record.speaker.clone(), Style::default().fg(Color::Cyan)),
            Span::styled("  Date: ", Style::default().fg(Color::DarkGray)),
            Span::styled(record.date_label(), Style::default().fg(Color::Cyan)),
        ]));
    }
    let height = name_lines.len() as u16;
    let name = Cell::from(Text::from(name_lines));

    let cells = match mode {
        TableMode::Full => vec![
            name,
            Cell::from(record.date_label()),
            Cell::from(record.speaker.clone()),
            status_cell(record.status),
        ],
        TableMode::Compact => vec![name, status_cell(record.status)],
    };

    Row::new(cells).height(height)
}

fn header_row(mode: TableMode) -> Row<'static> {
    let titles: &[&str] = match mode {
        TableMode::Full => &["Event", "Date", "Speaker", "Status"],
        TableMode::Compact => &["Event", "Status"],
    };
    Row::new(titles.iter().map(|t| Cell::from(*t)).collect::<Vec<_>>()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn column_widths(mode: TableMode) -> Vec<Constraint> {
    match mode {
        TableMode::Full => vec![
            Constraint::Percentage(40),
            Constraint::Length(12),
            Constraint::Percentage(30),
            Constraint::Length(14),
        ],
        TableMode::Compact => vec![Constraint::Min(10), Constraint::Length(14)],
    }
}

/// Table component for the current page of records
pub struct EventTable {
    /// Highlight cursor within the page
    pub state: TableState,
    /// Rows showing their detail line
    pub expanded: HashSet<RecordId>,
    /// Row ids and heights from the last draw, for mouse hit-testing
    drawn_rows: Vec<(RecordId, u16)>,
    /// Area of the last draw
    area: Rect,
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTable {
    pub fn new() -> Self {
        Self {
            state: TableState::default(),
            expanded: HashSet::new(),
            drawn_rows: Vec::new(),
            area: Rect::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Move down one row, wrapping to the top
    pub fn next(&mut self, row_count: usize) {
        if row_count == 0 {
            self.state.select(None);
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < row_count => i + 1,
            _ => 0,
        };
        self.state.select(Some(next));
    }

    /// Move up one row, wrapping to the bottom
    pub fn previous(&mut self, row_count: usize) {
        if row_count == 0 {
            self.state.select(None);
            return;
        }
        let prev = match self.state.selected() {
            Some(i) if i > 0 && i < row_count => i - 1,
            _ => row_count - 1,
        };
        self.state.select(Some(prev));
    }

    pub fn select_first(&mut self, row_count: usize) {
        self.state.select(if row_count == 0 { None } else { Some(0) });
        *self.state.offset_mut() = 0;
    }

    pub fn select_last(&mut self, row_count: usize) {
        self.state.select(row_count.checked_sub(1));
    }

    /// Keep the cursor on a valid row after the page shrinks
    pub fn clamp(&mut self, row_count: usize) {
        match self.state.selected() {
            _ if row_count == 0 => self.state.select(None),
            Some(i) if i >= row_count => self.state.select(Some(row_count - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expansion
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_expansion(&mut self, id: RecordId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: RecordId) -> bool {
        self.expanded.contains(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hit Testing
    // ─────────────────────────────────────────────────────────────────────────

    /// Record drawn at a terminal cell, if any
    pub fn record_at(&self, column: u16, row: u16) -> Option<RecordId> {
        let area = self.area;
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row < area.y + area.height.saturating_sub(1);
        // Border line plus the header row
        let body_top = area.y + 2;
        if !inside || row < body_top {
            return None;
        }

        let mut top = body_top;
        for (id, height) in self.drawn_rows.iter().skip(self.state.offset()) {
            if row < top + height {
                return Some(*id);
            }
            top += height;
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the page rows inside a bordered block titled `title`
    pub fn draw_with_rows(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[&EventRecord],
        title: &str,
    ) {
        self.area = area;
        self.clamp(rows.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(Color::DarkGray));

        if rows.is_empty() {
            self.drawn_rows.clear();
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No events match the current search and filters",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    "Press x to clear filters",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let mode = TableMode::for_width(area.width);
        self.drawn_rows = rows
            .iter()
            .map(|r| (r.id, if self.is_expanded(r.id) { 2 } else { 1 }))
            .collect();

        let table_rows: Vec<Row> = rows
            .iter()
            .map(|r| build_row(r, mode, self.is_expanded(r.id)))
            .collect();

        let table = Table::new(table_rows, column_widths(mode))
            .header(header_row(mode))
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Component for EventTable {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .record_at(mouse.column, mouse.row)
                .map(Action::OpenDetailFor),
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rows are borrowed from the session; see draw_with_rows
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn records() -> Vec<EventRecord> {
        let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        vec![
            EventRecord::new(1, "Kickoff", date(1), "Ada", EventStatus::InProgress),
            EventRecord::new(2, "Review", date(2), "Grace", EventStatus::Complete),
            EventRecord::new(3, "Retro", date(3), "Linus", EventStatus::Complete),
        ]
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let mut table = EventTable::new();
        table.select_first(3);
        table.previous(3);
        assert_eq!(table.selected_index(), Some(2));
        table.next(3);
        assert_eq!(table.selected_index(), Some(0));

        table.next(0);
        assert_eq!(table.selected_index(), None);
    }

    #[test]
    fn test_clamp_after_page_shrinks() {
        let mut table = EventTable::new();
        table.select_last(5);
        table.clamp(2);
        assert_eq!(table.selected_index(), Some(1));
        table.clamp(0);
        assert_eq!(table.selected_index(), None);
    }

    #[test]
    fn test_toggle_expansion() {
        let mut table = EventTable::new();
        table.toggle_expansion(RecordId(2));
        assert!(table.is_expanded(RecordId(2)));
        table.toggle_expansion(RecordId(2));
        assert!(!table.is_expanded(RecordId(2)));
    }

    #[test]
    fn test_click_maps_to_record() {
        let records = records();
        let rows: Vec<&EventRecord> = records.iter().collect();
        let mut table = EventTable::new();
        table.toggle_expansion(RecordId(1));

        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal
            .draw(|frame| table.draw_with_rows(frame, frame.area(), &rows, " Events "))
            .unwrap();

        // Row 0 is the border, row 1 the header
        assert_eq!(table.record_at(5, 1), None);
        assert_eq!(table.record_at(5, 2), Some(RecordId(1)));
        // Expanded first row takes two lines
        assert_eq!(table.record_at(5, 3), Some(RecordId(1)));
        assert_eq!(table.record_at(5, 4), Some(RecordId(2)));
        assert_eq!(table.record_at(5, 5), Some(RecordId(3)));
        assert_eq!(table.record_at(5, 6), None);

        let action = table.handle_mouse_event(click(10, 4)).unwrap();
        assert_eq!(action, Some(Action::OpenDetailFor(RecordId(2))));
    }

    #[test]
    fn test_compact_mode_for_narrow_terminals() {
        assert_eq!(TableMode::for_width(60), TableMode::Compact);
        assert_eq!(TableMode::for_width(120), TableMode::Full);
    }
}
