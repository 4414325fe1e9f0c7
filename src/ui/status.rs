use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (text, style) = if let Some(err) = &model.last_error {
        (
            format!(" [error] {err}"),
            Style::default().bg(Color::Red).fg(Color::White),
        )
    } else {
        (
            status_text(model),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

pub(super) fn status_text(model: &Model) -> String {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let current = model.current_entries();
    let current = if current.is_empty() {
        "-".to_string()
    } else {
        current.join(" ")
    };
    let unmapped = match model.unmapped_count() {
        0 => String::new(),
        n => format!("  [{n} unlinked]"),
    };
    format!(
        " {}  [{}%]  Row {}/{}  {}: {}{}  ?:help",
        filename,
        model.viewport.scroll_percent(),
        model.viewport.offset() + 1,
        model.viewport.total_rows(),
        model.marker_class(),
        current,
        unmapped
    )
}
