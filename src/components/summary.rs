//! Summary strip above the table

use crate::components::layout::split_boxes;
use crate::model::Summary;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn accent(title: &str) -> Color {
    match title {
        "Complete" => Color::Green,
        "In Progress" => Color::Blue,
        "Completion" => Color::Magenta,
        _ => Color::Cyan,
    }
}

/// Draw one bordered box per summary figure
pub fn draw_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    if area.height == 0 {
        return;
    }

    let boxes = summary.boxes();
    for ((title, value), cell) in boxes.iter().zip(split_boxes(area, boxes.len())) {
        let color = accent(title);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(color)),
        );
        frame.render_widget(paragraph, cell);
    }
}
