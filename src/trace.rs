//! Headless host: scroll through a page and print marker transitions.

use std::io::{self, Write};

use crate::config::Settings;
use crate::error::Error;
use crate::highlight::{self, ApplyReport};
use crate::observer::VisibilitySource;
use crate::page::Page;
use crate::viewport::Viewport;

/// Viewport geometry for a trace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOptions {
    /// Rows on screen
    pub height: u16,
    /// Rows scrolled per step; `None` means half a screen
    pub step: Option<usize>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            height: 24,
            step: None,
        }
    }
}

/// Totals over a whole trace run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub steps: usize,
    pub transitions: usize,
    pub skipped: usize,
}

/// Scroll `page` from top to bottom, writing one line per transition:
/// `row=<offset> +<entry>` when marked, `row=<offset> -<entry>` when cleared.
///
/// Records for sections without an entry print as `row=<offset> ?<section>`.
/// With the halt policy the lines of the records applied before the failing
/// one are written, then `row=<offset> !<section>`, then the error returns.
///
/// # Errors
/// Returns an error if writing to `out` fails, or (with the halt policy)
/// when a record names a section without a navigation entry.
pub fn run(
    page: &mut Page,
    settings: &Settings,
    options: TraceOptions,
    out: &mut impl Write,
) -> anyhow::Result<TraceSummary> {
    let (highlighter, mut observer) = highlight::init(page, settings);
    let height = options.height.max(1);
    let step = options
        .step
        .unwrap_or(usize::from(height) / 2)
        .max(1);
    let mut viewport = Viewport::new(80, height, page.line_count());
    let mut summary = TraceSummary::default();

    loop {
        let records = observer.take_records(&viewport);
        let offset = viewport.offset();
        let (report, halted) = match highlighter.apply(page, &records) {
            Ok(report) => (report, None),
            Err(err) => (ApplyReport::default(), Some(err)),
        };
        // Under the halt policy only the records before the failing one took effect.
        let applied = match &halted {
            Some(Error::MissingEntry { section, .. }) => records
                .iter()
                .position(|r| &r.target == section)
                .unwrap_or(records.len()),
            Some(_) => 0,
            None => records.len(),
        };
        for record in &records[..applied] {
            if report.skipped.contains(&record.target) {
                writeln!(out, "row={offset} ?{}", record.target)?;
                continue;
            }
            let entry = highlighter.map().entry_id_for(&record.target);
            let sign = if record.is_intersecting { '+' } else { '-' };
            writeln!(out, "row={offset} {sign}{entry}")?;
        }
        if let Some(err) = halted {
            if let Some(record) = records.get(applied) {
                writeln!(out, "row={offset} !{}", record.target)?;
            }
            out.flush()?;
            return Err(err.into());
        }
        summary.steps += 1;
        summary.transitions += report.marked + report.cleared;
        summary.skipped += report.skipped.len();
        crate::perf::log_event(
            "trace.step",
            format!(
                "offset={} marked={} cleared={} skipped={}",
                viewport.offset(),
                report.marked,
                report.cleared,
                report.skipped.len()
            ),
        );

        let before = viewport.offset();
        viewport.scroll_down(step);
        if viewport.offset() == before {
            break;
        }
    }
    out.flush()?;
    Ok(summary)
}

/// Print the ids of the currently marked entries, one per line.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn write_marked(page: &Page, class: &str, out: &mut impl Write) -> io::Result<()> {
    for id in page.entries_marked(class) {
        writeln!(out, "{id}")?;
    }
    Ok(())
}
