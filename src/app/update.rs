use crate::app::Model;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,
    /// Scroll the section of the nth TOC entry to the top
    JumpToEntry(usize),

    // TOC
    /// Toggle TOC sidebar visibility
    ToggleToc,
    /// Scroll the TOC list without moving the document
    TocScrollUp,
    TocScrollDown,

    // Overlays
    ToggleHelp,
    HideHelp,

    // Window
    /// Terminal resized (full terminal size)
    Resize(u16, u16),
    Redraw,

    /// Quit the application
    Quit,
}

/// Update the model for a message.
///
/// Every viewport change is followed by a visibility sync, so markers are
/// current before the next frame is drawn.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),
        Message::JumpToEntry(idx) => {
            let start = model
                .page
                .nav_entries()
                .get(idx)
                .and_then(|entry| model.page.section(entry.section.as_str()))
                .map(|section| section.rows.start);
            if let Some(row) = start {
                model.viewport.go_to_row(row);
            }
        }
        Message::ToggleToc => {
            model.toc_visible = !model.toc_visible;
            model.reflow();
        }
        Message::TocScrollUp => {
            model.toc_scroll_offset = model.toc_scroll_offset.saturating_sub(1);
        }
        Message::TocScrollDown => {
            let max = model
                .page
                .nav_entries()
                .len()
                .saturating_sub(model.toc_visible_rows());
            model.toc_scroll_offset = (model.toc_scroll_offset + 1).min(max);
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.reflow();
        }
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }

    model.sync_highlights();
    model
}
