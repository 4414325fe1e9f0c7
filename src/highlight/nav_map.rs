use std::collections::HashMap;

use super::NavTarget;
use crate::page::SectionId;

/// Section id to navigation entry id, resolved once at initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMap {
    prefix: String,
    entries: HashMap<SectionId, String>,
    unmapped: Vec<SectionId>,
}

impl NavMap {
    /// Resolve `<prefix><section id>` for every section against `target`.
    ///
    /// Sections whose entry does not exist are kept in [`NavMap::unmapped`].
    pub fn build<'a, T>(
        sections: impl IntoIterator<Item = &'a SectionId>,
        target: &T,
        prefix: &str,
    ) -> Self
    where
        T: NavTarget + ?Sized,
    {
        let mut entries = HashMap::new();
        let mut unmapped = Vec::new();
        for section in sections {
            let entry = format!("{prefix}{section}");
            if target.has_entry(&entry) {
                entries.insert(section.clone(), entry);
            } else {
                unmapped.push(section.clone());
            }
        }
        Self {
            prefix: prefix.to_string(),
            entries,
            unmapped,
        }
    }

    pub fn entry_for(&self, section: &SectionId) -> Option<&str> {
        self.entries.get(section).map(String::as_str)
    }

    /// The entry id the section would map to, resolved or not.
    pub fn entry_id_for(&self, section: &SectionId) -> String {
        self.entry_for(section)
            .map_or_else(|| format!("{}{section}", self.prefix), ToOwned::to_owned)
    }

    pub fn unmapped(&self) -> &[SectionId] {
        &self.unmapped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
