//! Row and marker styling.
//!
//! Uses ANSI colors so the terminal's palette decides the final look.

use ratatui::style::{Color, Modifier, Style};

use crate::page::RowKind;

/// Style of a document row.
pub fn style_for_row(kind: RowKind) -> Style {
    match kind {
        RowKind::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        RowKind::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(3) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(_) => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        RowKind::Code => Style::default().fg(Color::Indexed(245)),
        RowKind::Quote => Style::default()
            .fg(Color::Indexed(250))
            .add_modifier(Modifier::ITALIC),
        RowKind::Rule => Style::default().fg(Color::DarkGray),
        RowKind::Paragraph | RowKind::ListItem | RowKind::Empty => Style::default(),
    }
}

/// Style of a TOC entry; current entries are reversed.
pub fn style_for_entry(level: u8, current: bool) -> Style {
    let base = style_for_row(RowKind::Heading(level)).remove_modifier(Modifier::UNDERLINED);
    if current { base.reversed() } else { base }
}
