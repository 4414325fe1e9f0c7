//! Terminal previewer hosting the highlighter.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: page, viewport, observer and highlighter state
//! - [`Message`]: all possible events and actions
//! - [`update`]: state transitions, each followed by a visibility sync
//! - [`App::run`]: main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::Model;
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::Settings;

/// Owns the startup options and runs the event loop.
pub struct App {
    file_path: PathBuf,
    toc_visible: bool,
    settings: Settings,
}

impl App {
    /// Create an application for the given markdown file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            toc_visible: true,
            settings: Settings::default(),
        }
    }

    /// Set initial TOC visibility.
    #[must_use]
    pub const fn with_toc_visible(mut self, visible: bool) -> Self {
        self.toc_visible = visible;
        self
    }

    /// Use explicit highlighter settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

#[cfg(test)]
mod tests;
