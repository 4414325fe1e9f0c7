//! Table-of-contents highlighter.
//!
//! Keeps the current marker class on the navigation entries whose sections
//! are visible:
//! - [`init`]: select the sections, subscribe them, resolve their entries once
//! - [`Highlighter::apply`]: toggle the marker for a batch of visibility records
//! - [`NavTarget`]: the class-mutation capability the highlighter writes through

mod nav_map;

pub use nav_map::NavMap;

use std::fmt;
use std::str::FromStr;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::observer::{IntersectionObserver, VisibilityRecord, VisibilitySource};
use crate::page::{Page, SectionId};

/// Class name of the current marker.
pub const DEFAULT_MARKER_CLASS: &str = "current";

/// Where navigation entries live and how their classes change.
pub trait NavTarget {
    fn has_entry(&self, entry_id: &str) -> bool;

    /// Add (`on`) or remove the class; `false` when the entry does not exist.
    fn set_marker(&mut self, entry_id: &str, class: &str, on: bool) -> bool;
}

/// What to do with a record whose section has no navigation entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingEntryPolicy {
    /// Warn, note it in the report, continue with the next record.
    #[default]
    Skip,
    /// Stop the batch with [`Error::MissingEntry`]; earlier records stay applied.
    Halt,
}

impl FromStr for MissingEntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "halt" => Ok(Self::Halt),
            other => Err(format!("unknown missing-entry policy `{other}`")),
        }
    }
}

impl fmt::Display for MissingEntryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skip => "skip",
            Self::Halt => "halt",
        })
    }
}

/// Outcome of one applied batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Records that added the marker
    pub marked: usize,
    /// Records that removed the marker
    pub cleared: usize,
    /// Sections whose entry could not be found
    pub skipped: Vec<SectionId>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Toggles the marker class on navigation entries.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    map: NavMap,
    marker_class: String,
    policy: MissingEntryPolicy,
}

impl Highlighter {
    pub fn new(map: NavMap, marker_class: impl Into<String>, policy: MissingEntryPolicy) -> Self {
        Self {
            map,
            marker_class: marker_class.into(),
            policy,
        }
    }

    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    pub const fn policy(&self) -> MissingEntryPolicy {
        self.policy
    }

    pub const fn map(&self) -> &NavMap {
        &self.map
    }

    /// Sections that had no navigation entry at initialization.
    pub fn unmapped(&self) -> &[SectionId] {
        self.map.unmapped()
    }

    /// Apply a batch in delivery order.
    ///
    /// # Errors
    /// With [`MissingEntryPolicy::Halt`], returns [`Error::MissingEntry`] at the
    /// first record whose entry cannot be found. Records before it keep their
    /// effect; records after it are not processed.
    pub fn apply<T>(&self, target: &mut T, records: &[VisibilityRecord]) -> Result<ApplyReport>
    where
        T: NavTarget + ?Sized,
    {
        let mut report = ApplyReport::default();
        for record in records {
            let applied = self
                .map
                .entry_for(&record.target)
                .is_some_and(|entry| target.set_marker(entry, &self.marker_class, record.is_intersecting));

            if applied {
                tracing::debug!(
                    section = %record.target,
                    intersecting = record.is_intersecting,
                    ratio = record.ratio,
                    "marker"
                );
                if record.is_intersecting {
                    report.marked += 1;
                } else {
                    report.cleared += 1;
                }
                continue;
            }

            let entry = self.map.entry_id_for(&record.target);
            match self.policy {
                MissingEntryPolicy::Skip => {
                    tracing::warn!(section = %record.target, entry = %entry, "no navigation entry, skipping");
                    report.skipped.push(record.target.clone());
                }
                MissingEntryPolicy::Halt => {
                    return Err(Error::MissingEntry {
                        section: record.target.clone(),
                        entry,
                    });
                }
            }
        }
        Ok(report)
    }
}

/// Wire a page's sections to a fresh observer and highlighter.
///
/// Every section of the content container is subscribed; the entry of each
/// section is resolved once here. Nothing is marked until the first batch
/// is applied.
pub fn init(page: &Page, settings: &Settings) -> (Highlighter, IntersectionObserver) {
    let mut observer = IntersectionObserver::new(settings.threshold);
    for section in page.sections() {
        observer.observe(section);
    }

    let map = NavMap::build(
        page.sections().iter().map(|s| &s.id),
        page,
        &settings.nav_prefix,
    );
    for section in map.unmapped() {
        tracing::warn!(section = %section, "section has no navigation entry");
    }

    let highlighter = Highlighter::new(map, settings.marker_class.clone(), settings.policy);
    (highlighter, observer)
}
