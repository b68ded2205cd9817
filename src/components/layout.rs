//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub summary: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub pagination: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
///
/// The summary strip is dropped on short terminals so the table keeps
/// room for at least a few rows.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let summary_height = if area.height >= 20 { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary_height),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        summary: chunks[0],
        filters: chunks[1],
        table: chunks[2],
        pagination: chunks[3],
        status: chunks[4],
        help: chunks[5],
    }
}

/// Split a strip into `count` equal-width boxes
pub fn split_boxes(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        let clipped = centered_popup(small, 40, 10);
        assert_eq!(clipped.width, 20);
        assert_eq!(clipped.height, 5);
    }

    #[test]
    fn test_main_layout_hides_summary_on_short_terminals() {
        let tall = calculate_main_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(tall.summary.height, 4);
        assert_eq!(tall.help.y, 39);

        let short = calculate_main_layout(Rect::new(0, 0, 120, 12));
        assert_eq!(short.summary.height, 0);
        assert_eq!(short.filters.height, 3);
    }

    #[test]
    fn test_split_boxes() {
        let boxes = split_boxes(Rect::new(0, 0, 80, 4), 4);
        assert_eq!(boxes.len(), 4);
        assert_eq!(boxes.iter().map(|b| b.width).sum::<u16>(), 80);
        assert!(split_boxes(Rect::new(0, 0, 80, 4), 0).is_empty());
    }
}
