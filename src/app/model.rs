use std::path::PathBuf;

use crate::config::Settings;
use crate::highlight::{self, ApplyReport, Highlighter};
use crate::observer::{IntersectionObserver, VisibilitySource};
use crate::page::{NavEntry, Page, ParseOptions};
use crate::viewport::Viewport;

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Default)]
pub struct Model {
    /// The rendered post
    pub page: Page,
    /// Viewport over the document pane
    pub viewport: Viewport,
    /// Path to the source file
    pub file_path: PathBuf,
    /// Threshold, marker and entry naming in effect
    pub settings: Settings,
    observer: IntersectionObserver,
    highlighter: Highlighter,
    /// Whether the TOC sidebar is visible
    pub toc_visible: bool,
    /// Scroll offset of the TOC list
    pub toc_scroll_offset: usize,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Outcome of the last applied visibility batch
    pub last_report: ApplyReport,
    /// Set when a batch stopped at a missing entry (halt policy)
    pub last_error: Option<String>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("viewport", &self.viewport)
            .field("toc_visible", &self.toc_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model and deliver the initial visibility batch.
    ///
    /// `terminal_size` includes the status row.
    pub fn new(
        file_path: PathBuf,
        page: Page,
        terminal_size: (u16, u16),
        settings: Settings,
    ) -> Self {
        let total_rows = page.line_count();
        let mut model = Self {
            page,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_rows,
            ),
            file_path,
            settings,
            ..Self::default()
        };
        model.connect();
        model
    }

    #[must_use]
    pub fn with_toc_visible(mut self, visible: bool) -> Self {
        self.toc_visible = visible;
        self
    }

    /// Subscribe every section of the current page and mark what is visible.
    fn connect(&mut self) {
        let (highlighter, observer) = highlight::init(&self.page, &self.settings);
        self.highlighter = highlighter;
        self.observer = observer;
        self.sync_highlights();
    }

    /// Drain pending visibility records into the highlighter.
    pub fn sync_highlights(&mut self) {
        let records = self.observer.take_records(&self.viewport);
        if records.is_empty() {
            return;
        }
        match self.highlighter.apply(&mut self.page, &records) {
            Ok(report) => {
                crate::perf::log_event(
                    "highlight.batch",
                    format!(
                        "offset={} records={} marked={} cleared={} skipped={}",
                        self.viewport.offset(),
                        records.len(),
                        report.marked,
                        report.cleared,
                        report.skipped.len()
                    ),
                );
                self.last_report = report;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!("{err}");
                crate::perf::log_event("highlight.error", err.to_string());
                self.last_error = Some(err.to_string());
            }
        }
        self.follow_current_in_toc();
    }

    pub fn marker_class(&self) -> &str {
        self.highlighter.marker_class()
    }

    pub fn is_current(&self, entry: &NavEntry) -> bool {
        entry.classes.contains(self.highlighter.marker_class())
    }

    /// Ids of the entries currently carrying the marker.
    pub fn current_entries(&self) -> Vec<&str> {
        self.page.entries_marked(self.highlighter.marker_class())
    }

    /// Sections without a navigation entry at initialization.
    pub fn unmapped_count(&self) -> usize {
        self.highlighter.unmapped().len()
    }

    /// Width available to document text.
    pub fn layout_width(&self) -> u16 {
        crate::ui::document_content_width(self.viewport.width(), self.toc_visible)
    }

    pub(super) fn toc_visible_rows(&self) -> usize {
        // TOC uses the document pane height minus its border rows.
        (self.viewport.height() as usize).saturating_sub(2).max(1)
    }

    /// Keep the first current entry inside the TOC window.
    fn follow_current_in_toc(&mut self) {
        let marker = self.highlighter.marker_class();
        let Some(first) = self
            .page
            .nav_entries()
            .iter()
            .position(|e| e.classes.contains(marker))
        else {
            return;
        };
        let rows = self.toc_visible_rows();
        if first < self.toc_scroll_offset {
            self.toc_scroll_offset = first;
        } else if first >= self.toc_scroll_offset + rows {
            self.toc_scroll_offset = first + 1 - rows;
        }
    }

    /// Re-render the page for the current layout width and resubscribe.
    ///
    /// Pages assembled without markdown source keep their geometry.
    pub(super) fn reflow(&mut self) {
        if self.page.source().is_empty() {
            self.viewport.set_total_rows(self.page.line_count());
            return;
        }
        let options = ParseOptions {
            width: self.layout_width(),
            nav_prefix: self.settings.nav_prefix.clone(),
        };
        match Page::parse_with_options(self.page.source(), &options) {
            Ok(page) => {
                self.page = page;
                self.viewport.set_total_rows(self.page.line_count());
                self.connect();
            }
            Err(err) => tracing::warn!("reflow failed: {err}"),
        }
    }
}
