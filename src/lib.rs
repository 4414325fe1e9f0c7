// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. page::PageParser)
    clippy::module_name_repetitions
)]

//! # Tocmark
//!
//! Scroll-spy for tables of contents.
//!
//! A page is a list of sections plus a navigation list with one entry per
//! section. While the reader scrolls, every entry whose section is at least
//! 30% visible carries the `current` marker class; the marker comes off as
//! soon as the section drops below that.
//!
//! ## Architecture
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Page, viewport, observer and highlighter state
//! - **Message**: Scrolling, TOC navigation, resize
//! - **Update**: Pure state transitions, followed by a highlight sync
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`page`]: Markdown parsing into sections and navigation entries
//! - [`observer`]: Visibility measurement against a viewport
//! - [`highlight`]: Applying visibility records to navigation entries
//! - [`viewport`]: Scroll position over rendered rows
//! - [`app`]: Terminal application loop and state
//! - [`ui`]: Terminal UI components
//! - [`trace`]: Headless scroll-through that prints marker transitions
//! - [`config`]: Saved defaults and resolved settings
//! - [`perf`]: Timing scopes and the event log
//! - `web` (feature `web`): the same highlighter driving a browser page

pub mod app;
pub mod config;
pub mod error;
pub mod highlight;
pub mod observer;
pub mod page;
pub mod perf;
pub mod trace;
pub mod ui;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::Settings;
    pub use crate::highlight::{Highlighter, MissingEntryPolicy, NavTarget};
    pub use crate::observer::{IntersectionObserver, Threshold, VisibilityRecord, VisibilitySource};
    pub use crate::page::{NavEntry, Page, Section, SectionId};
    pub use crate::viewport::Viewport;
}
