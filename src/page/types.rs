//! Core page types.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::highlight::NavTarget;

/// Default prefix joining a section id to its navigation entry id.
pub const DEFAULT_NAV_PREFIX: &str = "ct-";

/// Identifier of a section element (its `id` attribute).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A section element of the content container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Unique id
    pub id: SectionId,
    /// Heading level (1-6) that opened the section
    pub level: u8,
    /// Heading text (plain, no formatting)
    pub title: String,
    /// Rows occupied in the rendered page, nested sections included
    pub rows: Range<usize>,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, level: u8, title: impl Into<String>, rows: Range<usize>) -> Self {
        Self {
            id: id.into(),
            level,
            title: title.into(),
            rows,
        }
    }

    /// Number of rows the section spans.
    pub fn height(&self) -> usize {
        self.rows.end.saturating_sub(self.rows.start)
    }
}

/// Space-separated class set of an element, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Add `class`; a no-op when already present.
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    /// Remove `class`; a no-op when absent.
    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// A table-of-contents entry pointing at a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Element id, `ct-<section id>` with the default prefix
    pub id: String,
    /// Section the entry links to (`href="#<section>"`)
    pub section: SectionId,
    /// Link text
    pub text: String,
    /// Heading level of the linked section
    pub level: u8,
    /// Class list; carries the current marker
    pub classes: ClassList,
}

impl NavEntry {
    pub fn new(id: impl Into<String>, section: impl Into<SectionId>) -> Self {
        let section = section.into();
        Self {
            id: id.into(),
            text: section.to_string(),
            section,
            level: 1,
            classes: ClassList::default(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>, level: u8) -> Self {
        self.text = text.into();
        self.level = level;
        self
    }
}

/// Visual role of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Heading(u8),
    Paragraph,
    ListItem,
    Quote,
    Code,
    Rule,
    Empty,
}

/// One rendered row of the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    text: String,
    kind: RowKind,
}

impl Row {
    pub fn new(text: impl Into<String>, kind: RowKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), RowKind::Empty)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn kind(&self) -> RowKind {
        self.kind
    }
}

/// A rendered post: body rows, the sections of its content container, and
/// the navigation entries of its table of contents.
#[derive(Debug, Clone, Default)]
pub struct Page {
    source: String,
    rows: Vec<Row>,
    sections: Vec<Section>,
    nav: Vec<NavEntry>,
    nav_index: HashMap<String, usize>,
}

impl Page {
    /// Assemble a page from explicit parts.
    ///
    /// The body is padded with empty rows so every section extent fits.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateSection`] when two sections share an id.
    pub fn new(sections: Vec<Section>, nav: Vec<NavEntry>) -> Result<Self> {
        let total_rows = sections.iter().map(|s| s.rows.end).max().unwrap_or(0);
        let rows = vec![Row::empty(); total_rows];
        Self::from_rendered(String::new(), rows, sections, nav)
    }

    pub(super) fn from_rendered(
        source: String,
        rows: Vec<Row>,
        sections: Vec<Section>,
        nav: Vec<NavEntry>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(Error::DuplicateSection(section.id.to_string()));
            }
        }
        let mut page = Self {
            source,
            rows,
            sections,
            nav,
            nav_index: HashMap::new(),
        };
        page.reindex();
        Ok(page)
    }

    fn reindex(&mut self) {
        self.nav_index = self
            .nav
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.id.clone(), i))
            .collect();
    }

    /// Markdown source the page was rendered from (empty for assembled pages).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in `start..start + count`, clamped to the page.
    pub fn visible_rows(&self, start: usize, count: usize) -> &[Row] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(count).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Every section of the content container, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }

    pub fn nav_entries(&self) -> &[NavEntry] {
        &self.nav
    }

    pub fn nav_entry(&self, id: &str) -> Option<&NavEntry> {
        self.nav_index.get(id).map(|&i| &self.nav[i])
    }

    pub fn nav_entry_mut(&mut self, id: &str) -> Option<&mut NavEntry> {
        self.nav_index.get(id).map(|&i| &mut self.nav[i])
    }

    /// Drop a navigation entry from the table of contents.
    pub fn remove_nav_entry(&mut self, id: &str) -> Option<NavEntry> {
        let idx = self.nav_index.get(id).copied()?;
        let entry = self.nav.remove(idx);
        self.reindex();
        Some(entry)
    }

    /// Ids of the entries carrying `class`, in table-of-contents order.
    pub fn entries_marked(&self, class: &str) -> Vec<&str> {
        self.nav
            .iter()
            .filter(|entry| entry.classes.contains(class))
            .map(|entry| entry.id.as_str())
            .collect()
    }
}

impl NavTarget for Page {
    fn has_entry(&self, entry_id: &str) -> bool {
        self.nav_index.contains_key(entry_id)
    }

    fn set_marker(&mut self, entry_id: &str, class: &str, on: bool) -> bool {
        match self.nav_entry_mut(entry_id) {
            Some(entry) => {
                entry.classes.toggle(class, on);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_add_is_idempotent() {
        let mut classes = ClassList::default();
        classes.add("current");
        classes.add("current");
        assert_eq!(classes.to_string(), "current");
    }

    #[test]
    fn test_class_list_remove_absent_is_noop() {
        let mut classes = ClassList::default();
        classes.add("toc");
        classes.remove("current");
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["toc"]);
    }

    #[test]
    fn test_page_new_rejects_duplicate_ids() {
        let sections = vec![
            Section::new("intro", 2, "Intro", 0..5),
            Section::new("intro", 2, "Intro again", 5..10),
        ];
        let err = Page::new(sections, Vec::new()).unwrap_err();
        assert_eq!(err, Error::DuplicateSection("intro".to_string()));
    }

    #[test]
    fn test_page_new_pads_rows_to_last_section() {
        let page = Page::new(vec![Section::new("a", 1, "A", 3..12)], Vec::new()).unwrap();
        assert_eq!(page.line_count(), 12);
    }

    #[test]
    fn test_remove_nav_entry_keeps_lookup_consistent() {
        let nav = vec![NavEntry::new("ct-a", "a"), NavEntry::new("ct-b", "b")];
        let mut page = Page::new(Vec::new(), nav).unwrap();
        assert!(page.remove_nav_entry("ct-a").is_some());
        assert!(page.nav_entry("ct-a").is_none());
        assert_eq!(page.nav_entry("ct-b").map(|e| e.section.as_str()), Some("b"));
    }

    #[test]
    fn test_set_marker_reports_missing_entry() {
        let mut page = Page::new(Vec::new(), vec![NavEntry::new("ct-a", "a")]).unwrap();
        assert!(page.set_marker("ct-a", "current", true));
        assert!(!page.set_marker("ct-missing", "current", true));
        assert_eq!(page.entries_marked("current"), vec!["ct-a"]);
    }
}
