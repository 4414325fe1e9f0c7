use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::Model;

use super::{DOC_WIDTH_PERCENT, DOCUMENT_LEFT_PADDING, TOC_WIDTH_PERCENT, overlays, status, style};

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TOC_WIDTH_PERCENT),
            Constraint::Percentage(DOC_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Columns available to document text for a terminal of `total_width`.
pub fn document_content_width(total_width: u16, toc_visible: bool) -> u16 {
    let area = Rect::new(0, 0, total_width, 1);
    let doc_width = if toc_visible {
        split_main_columns(area)[1].width
    } else {
        total_width
    };
    doc_width.saturating_sub(DOCUMENT_LEFT_PADDING).max(1)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let [main, status_row] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    if model.toc_visible {
        let chunks = split_main_columns(main);
        render_toc(model, frame, chunks[0]);
        render_document(model, frame, chunks[1]);
    } else {
        render_document(model, frame, main);
    }
    status::render_status_bar(model, frame, status_row);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_toc(model: &Model, frame: &mut Frame, area: Rect) {
    let entries = model.page.nav_entries();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = model
        .toc_scroll_offset
        .min(entries.len().saturating_sub(visible_rows));

    let items: Vec<Line> = entries
        .iter()
        .skip(start)
        .take(visible_rows)
        .map(|entry| {
            let current = model.is_current(entry);
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            let marker = if current { ">" } else { " " };
            Line::styled(
                format!("{marker}{indent} {}", entry.text),
                style::style_for_entry(entry.level, current),
            )
        })
        .collect();

    let toc = Paragraph::new(items).block(
        Block::default()
            .title("Contents")
            .borders(Borders::ALL),
    );
    frame.render_widget(toc, area);
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let rows = model
        .page
        .visible_rows(model.viewport.offset(), area.height as usize);
    let lines: Vec<Line> = rows
        .iter()
        .map(|row| Line::styled(row.text().to_string(), style::style_for_row(row.kind())))
        .collect();
    let doc = Paragraph::new(lines).block(
        Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING)),
    );
    frame.render_widget(doc, area);
}
