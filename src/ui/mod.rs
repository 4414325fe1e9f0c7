//! Terminal UI components.
//!
//! - [`render`]: document pane, TOC sidebar and status bar
//! - [`style`]: row and marker styling

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{document_content_width, render, split_main_columns};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
pub const TOC_WIDTH_PERCENT: u16 = 30;
pub const DOC_WIDTH_PERCENT: u16 = 70;
