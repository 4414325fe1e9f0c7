use std::collections::HashMap;

use proptest::prelude::*;

use tocmark::config::Settings;
use tocmark::highlight;
use tocmark::observer::VisibilityRecord;
use tocmark::page::{NavEntry, Page, Section};

const IDS: [&str; 5] = ["intro", "methods", "results", "discussion", "appendix"];

fn page() -> Page {
    let sections = IDS
        .iter()
        .enumerate()
        .map(|(i, id)| Section::new(*id, 2, *id, i * 8..i * 8 + 8))
        .collect();
    // An extra entry with no section must never be touched.
    let nav = IDS
        .iter()
        .map(|id| NavEntry::new(format!("ct-{id}"), *id))
        .chain(std::iter::once(NavEntry::new("ct-footer", "footer")))
        .collect();
    Page::new(sections, nav).unwrap()
}

fn batches() -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    prop::collection::vec(
        prop::collection::vec((0..IDS.len(), any::<bool>()), 0..6),
        1..12,
    )
}

fn to_records(batch: &[(usize, bool)]) -> Vec<VisibilityRecord> {
    batch
        .iter()
        .map(|&(i, on)| VisibilityRecord::new(IDS[i], on))
        .collect()
}

proptest! {
    #[test]
    fn marker_follows_last_record_per_section(batches in batches()) {
        let mut page = page();
        let (highlighter, _) = highlight::init(&page, &Settings::default());
        let mut last: HashMap<&str, bool> = HashMap::new();

        for batch in &batches {
            highlighter.apply(&mut page, &to_records(batch)).unwrap();
            for &(i, on) in batch {
                last.insert(IDS[i], on);
            }
        }

        for id in IDS {
            let entry = page.nav_entry(&format!("ct-{id}")).unwrap();
            let expected = last.get(id).copied().unwrap_or(false);
            prop_assert_eq!(entry.classes.contains("current"), expected, "{}", id);
        }
    }

    #[test]
    fn marker_only_lands_on_prefixed_entries(batches in batches()) {
        let mut page = page();
        let (highlighter, _) = highlight::init(&page, &Settings::default());
        for batch in &batches {
            highlighter.apply(&mut page, &to_records(batch)).unwrap();
        }
        prop_assert!(page.nav_entry("ct-footer").unwrap().classes.is_empty());
        for id in page.entries_marked("current") {
            let section = id.strip_prefix("ct-").unwrap();
            prop_assert!(IDS.contains(&section));
        }
    }

    #[test]
    fn toggling_one_entry_leaves_the_others(
        before in batches(),
        target in 0..IDS.len(),
        on in any::<bool>(),
    ) {
        let mut page = page();
        let (highlighter, _) = highlight::init(&page, &Settings::default());
        for batch in &before {
            highlighter.apply(&mut page, &to_records(batch)).unwrap();
        }
        let snapshot: Vec<(String, bool)> = page
            .nav_entries()
            .iter()
            .map(|e| (e.id.clone(), e.classes.contains("current")))
            .collect();

        highlighter
            .apply(&mut page, &[VisibilityRecord::new(IDS[target], on)])
            .unwrap();

        let changed = format!("ct-{}", IDS[target]);
        for (id, was) in snapshot {
            if id != changed {
                let entry = page.nav_entry(&id).unwrap();
                prop_assert_eq!(entry.classes.contains("current"), was, "{}", id);
            }
        }
    }

    #[test]
    fn repeated_state_is_idempotent(target in 0..IDS.len(), on in any::<bool>(), repeats in 1..5usize) {
        let mut page = page();
        let (highlighter, _) = highlight::init(&page, &Settings::default());
        highlighter
            .apply(&mut page, &[VisibilityRecord::new(IDS[target], on)])
            .unwrap();
        let once = page.nav_entries().to_vec();

        for _ in 0..repeats {
            highlighter
                .apply(&mut page, &[VisibilityRecord::new(IDS[target], on)])
                .unwrap();
        }
        prop_assert_eq!(page.nav_entries(), once.as_slice());
    }
}
