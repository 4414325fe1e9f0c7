//! Viewport intersection observer.
//!
//! Plays the part of the host's visibility primitive: targets are
//! registered once, measured against a [`Viewport`] on demand, and reported
//! as an ordered batch of [`VisibilityRecord`]s whenever their threshold
//! state changes. The first measurement of a target always reports.

use std::fmt;

use crate::error::{Error, Result};
use crate::page::{Section, SectionId};
use crate::viewport::Viewport;

/// Minimum visible fraction of a section's rows.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT: Self = Self(0.3);

    /// # Errors
    /// Returns [`Error::InvalidThreshold`] outside `0.0..=1.0` or for NaN.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    /// Whether `visible` of `total` rows satisfy the threshold.
    ///
    /// Zero visible rows never intersect, so threshold 0 means "any overlap".
    pub fn is_met(self, visible: usize, total: usize) -> bool {
        visible > 0 && ratio(visible, total) >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(visible: usize, total: usize) -> f64 {
    if total == 0 {
        return if visible > 0 { 1.0 } else { 0.0 };
    }
    visible as f64 / total as f64
}

/// One visibility change of one observed section.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityRecord {
    pub target: SectionId,
    pub is_intersecting: bool,
    /// Visible fraction of the target at measurement time
    pub ratio: f64,
}

impl VisibilityRecord {
    pub fn new(target: impl Into<SectionId>, is_intersecting: bool) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

/// Subscription capability handing out visibility batches.
///
/// Delivery is synchronous and single-threaded: the host asks for the
/// pending batch after every viewport change and hands it to the
/// highlighter before processing the next event.
pub trait VisibilitySource {
    /// Register a section; its first measurement reports unconditionally.
    ///
    /// Observing an already registered section only updates its geometry.
    fn observe(&mut self, section: &Section);

    /// Stop measuring a section.
    fn unobserve(&mut self, id: &SectionId);

    /// Measure every target and return the changes, in registration order.
    fn take_records(&mut self, viewport: &Viewport) -> Vec<VisibilityRecord>;
}

#[derive(Debug, Clone)]
struct Target {
    id: SectionId,
    rows: std::ops::Range<usize>,
    last: Option<bool>,
}

/// Row-geometry intersection observer with a single threshold.
#[derive(Debug, Clone, Default)]
pub struct IntersectionObserver {
    threshold: Threshold,
    targets: Vec<Target>,
}

impl IntersectionObserver {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            targets: Vec::new(),
        }
    }

    pub const fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Drop every target.
    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    fn measure(&self, target: &Target, viewport: &Viewport) -> (bool, f64) {
        let total = target.rows.end.saturating_sub(target.rows.start);
        let visible = if total == 0 {
            usize::from(viewport.contains_row(target.rows.start))
        } else {
            viewport.overlap(&target.rows)
        };
        (self.threshold.is_met(visible, total), ratio(visible, total))
    }
}

impl VisibilitySource for IntersectionObserver {
    fn observe(&mut self, section: &Section) {
        if let Some(existing) = self.targets.iter_mut().find(|t| t.id == section.id) {
            existing.rows = section.rows.clone();
            return;
        }
        self.targets.push(Target {
            id: section.id.clone(),
            rows: section.rows.clone(),
            last: None,
        });
    }

    fn unobserve(&mut self, id: &SectionId) {
        self.targets.retain(|t| &t.id != id);
    }

    fn take_records(&mut self, viewport: &Viewport) -> Vec<VisibilityRecord> {
        let measured: Vec<(bool, f64)> = self
            .targets
            .iter()
            .map(|target| self.measure(target, viewport))
            .collect();

        let mut records = Vec::new();
        for (target, (is_intersecting, ratio)) in self.targets.iter_mut().zip(measured) {
            if target.last == Some(is_intersecting) {
                continue;
            }
            target.last = Some(is_intersecting);
            records.push(VisibilityRecord {
                target: target.id.clone(),
                is_intersecting,
                ratio,
            });
        }
        if !records.is_empty() {
            tracing::debug!(
                offset = viewport.offset(),
                count = records.len(),
                "visibility batch"
            );
        }
        records
    }
}
