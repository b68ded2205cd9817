//! Home component - Main application screen
//!
//! Displays the summary strip, the filter bar, the event table, and the
//! pagination, status, and help bars. Owns the table cursor and search
//! mode; the records and query live in the session.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::summary::draw_summary;
use crate::components::table::EventTable;
use crate::model::query::QueryState;
use crate::model::record::DATE_FORMAT;
use crate::model::Summary;
use crate::services::engine::PageView;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main application view
pub struct HomeComponent {
    /// Table of the current page
    pub table: EventTable,

    /// Whether search mode is active
    pub search_mode: bool,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            table: EventTable::new(),
            search_mode: false,
        }
    }

    /// Keys while the search input has focus
    pub fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            KeyCode::Down => Some(Action::NextRow),
            KeyCode::Up => Some(Action::PrevRow),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return Ok(self.handle_search_key(key));
        }

        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Char(' ') => Some(Action::ToggleRowExpansion),
            KeyCode::Enter => Some(Action::OpenDetail),

            // Pages
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|d| Action::GoToPage(d as usize - 1)),

            // Search & filters
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('s') => Some(Action::OpenStatusFilter),
            KeyCode::Char('d') => Some(Action::OpenDateFilter),
            KeyCode::Char('o') => Some(Action::ToggleSortOrder),
            KeyCode::Char('x') => Some(Action::ClearFilters),
            KeyCode::Esc => Some(Action::ClearSearch),

            // Export
            KeyCode::Char('e') => Some(Action::Export),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.table.handle_mouse_event(mouse)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub page: &'a PageView<'a>,
    pub query: &'a QueryState,
    pub summary: Summary,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    draw_summary(frame, layout.summary, &ctx.summary);
    render_filter_bar(frame, layout.filters, home, ctx);

    let title = table_title(ctx);
    home.table
        .draw_with_rows(frame, layout.table, &ctx.page.rows, &title);

    render_pagination(frame, layout.pagination, ctx);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn table_title(ctx: &HomeRenderContext) -> String {
    let mut title = format!(" Events ({}) ", ctx.page.filtered_count);
    if let Some(status) = ctx.query.status_filter {
        title = format!("{} [{}] ", title.trim_end(), status.label());
    }
    if let Some(date) = ctx.query.date_filter {
        title = format!("{} [{}] ", title.trim_end(), date.format(DATE_FORMAT));
    }
    title
}

fn render_filter_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let query = ctx.query;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String, active: bool| {
        Span::styled(
            text,
            if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        )
    };

    let mut spans = vec![label(" Search: ")];
    if home.search_mode {
        spans.push(value(format!("{}█", query.search), true));
    } else if query.search.is_empty() {
        spans.push(label("(press /)"));
    } else {
        spans.push(value(query.search.clone(), true));
    }

    spans.push(label("   Date: "));
    spans.push(match query.date_filter {
        Some(date) => value(date.format(DATE_FORMAT).to_string(), true),
        None => value("any".to_string(), false),
    });

    spans.push(label("   Status: "));
    spans.push(match query.status_filter {
        Some(status) => value(status.label().to_string(), true),
        None => value("All".to_string(), false),
    });

    spans.push(label("   Sort: "));
    spans.push(value(query.sort_order.label().to_string(), false));

    spans.push(label("   Items: "));
    spans.push(value(ctx.page.filtered_count.to_string(), false));

    if query.has_filters() {
        spans.push(label("   (x to clear)"));
    }

    let border = if home.search_mode { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Filters "),
    );
    frame.render_widget(paragraph, area);
}

/// Pages shown on each side of the current one
const PAGE_WINDOW: usize = 3;

/// Page indicator followed by a window of page numbers around the current page
///
/// The first and last pages stay reachable; gaps are drawn as `…`.
fn pagination_spans(current: usize, total: usize) -> Vec<Span<'static>> {
    if total == 0 {
        return vec![Span::styled(" No pages", Style::default().fg(Color::DarkGray))];
    }

    let arrow = |text: &'static str, enabled: bool| {
        Span::styled(
            text,
            Style::default().fg(if enabled { Color::Cyan } else { Color::DarkGray }),
        )
    };
    let number = |page: usize| {
        if page == current {
            Span::styled(
                format!("[{}]", page + 1),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", page + 1), Style::default().fg(Color::White))
        }
    };
    let gap = || Span::styled(" … ", Style::default().fg(Color::DarkGray));

    let start = current.saturating_sub(PAGE_WINDOW);
    let end = (current + PAGE_WINDOW + 1).min(total);

    let mut spans = vec![
        Span::styled(
            format!(" Page {} of {} ", current + 1, total),
            Style::default().fg(Color::DarkGray),
        ),
        arrow(" ‹ Prev ", current > 0),
    ];
    if start > 0 {
        spans.push(number(0));
        if start > 1 {
            spans.push(gap());
        }
    }
    spans.extend((start..end).map(number));
    if end < total {
        if end < total - 1 {
            spans.push(gap());
        }
        spans.push(number(total - 1));
    }
    spans.push(arrow(" Next › ", current + 1 < total));
    spans
}

fn render_pagination(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let spans = pagination_spans(ctx.query.page_index, ctx.page.total_pages);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![Span::styled(
        " event-table ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let key = |text: &'static str, color: Color| {
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = if home.search_mode {
        vec![
            key(" Esc/Enter ", Color::Yellow),
            Span::raw("Done  "),
            key(" Backspace ", Color::Cyan),
            Span::raw("Delete  "),
            key(" ↑/↓ ", Color::Cyan),
            Span::raw("Rows"),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" Enter ", Color::Green),
            Span::raw("Details "),
            key(" ←/→ ", Color::Cyan),
            Span::raw("Page "),
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" s ", Color::Cyan),
            Span::raw("Status "),
            key(" d ", Color::Cyan),
            Span::raw("Date "),
            key(" o ", Color::Cyan),
            Span::raw("Sort "),
            key(" e ", Color::Magenta),
            Span::raw("Export "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{EventRecord, EventStatus};
    use crate::model::session::Session;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> Session {
        let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let records = (1..=7)
            .map(|i| {
                EventRecord::new(
                    i,
                    &format!("Event {}", i),
                    date(i as u32),
                    "Ada",
                    if i % 2 == 0 {
                        EventStatus::Complete
                    } else {
                        EventStatus::InProgress
                    },
                )
            })
            .collect();
        Session::new(records, QueryState::default())
    }

    #[test]
    fn test_home_key_bindings() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::GoToPage(2))
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Right)).unwrap(),
            Some(Action::NextPage)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::OpenDetail)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('0'))).unwrap(),
            None
        );
    }

    #[test]
    fn test_search_mode_captures_characters() {
        let mut home = HomeComponent::new();
        home.search_mode = true;
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ExitSearchMode)
        );
    }

    #[test]
    fn test_pagination_spans_mark_current_page() {
        let text: String = pagination_spans(1, 3)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.contains("[2]"));
        assert!(text.contains("Page 2 of 3"));

        let empty: String = pagination_spans(0, 0)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(empty.contains("No pages"));
    }

    #[test]
    fn test_pagination_spans_window_long_ranges() {
        let text: String = pagination_spans(45, 60)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.starts_with(" Page 46 of 60"));
        assert!(text.contains("[46]"));
        assert!(text.contains(" 43 "));
        assert!(text.contains(" 49 "));
        assert!(!text.contains(" 42 "));
        assert!(!text.contains(" 50 "));
        assert!(text.contains(" 1 "));
        assert!(text.contains(" 60 "));
        assert_eq!(text.matches('…').count(), 2);

        let first: String = pagination_spans(0, 5)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(!first.contains('…'));
        assert!(first.contains(" 4 "));
        assert!(first.contains(" 5 "));
    }

    #[test]
    fn test_current_page_visible_with_many_pages() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = (1..=60)
            .map(|i| EventRecord::new(i, &format!("Event {}", i), date, "Ada", EventStatus::Complete))
            .collect();
        let mut session = Session::new(records, QueryState::new(1, Default::default()));
        session.query.go_to_page(45, 60);
        let page = session.page();
        let ctx = HomeRenderContext {
            page: &page,
            query: &session.query,
            summary: session.summary(),
            error: None,
            status_message: None,
        };
        let mut home = HomeComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                draw_home_screen(frame, frame.area(), &mut home, &ctx).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Page 46 of 60"));
        assert!(text.contains("[46]"));
        assert!(text.contains("Event 46"));
    }

    #[test]
    fn test_home_screen_renders_page() {
        let session = session();
        let page = session.page();
        let ctx = HomeRenderContext {
            page: &page,
            query: &session.query,
            summary: session.summary(),
            error: None,
            status_message: Some("Exported 7 events"),
        };
        let mut home = HomeComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                draw_home_screen(frame, frame.area(), &mut home, &ctx).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Event 1"));
        assert!(!text.contains("Event 6"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("Exported 7 events"));
        assert!(text.contains("Total Events"));
        assert!(!text.contains("x to clear"));
    }

    #[test]
    fn test_filter_bar_offers_clear_when_filtered() {
        let mut session = session();
        session.query.set_status_filter(Some(EventStatus::Complete));
        let page = session.page();
        let ctx = HomeRenderContext {
            page: &page,
            query: &session.query,
            summary: session.summary(),
            error: None,
            status_message: None,
        };
        let mut home = HomeComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal
            .draw(|frame| {
                draw_home_screen(frame, frame.area(), &mut home, &ctx).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("x to clear"));
    }
}
