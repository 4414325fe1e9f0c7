use tocmark::Error;
use tocmark::config::Settings;
use tocmark::highlight::{self, MissingEntryPolicy};
use tocmark::observer::{VisibilityRecord, VisibilitySource};
use tocmark::page::{NavEntry, Page, Section, SectionId};
use tocmark::viewport::Viewport;

fn intro_and_methods() -> Page {
    let sections = vec![
        Section::new("intro", 2, "Intro", 0..10),
        Section::new("methods", 2, "Methods", 10..20),
    ];
    let nav = vec![
        NavEntry::new("ct-intro", "intro"),
        NavEntry::new("ct-methods", "methods"),
    ];
    Page::new(sections, nav).unwrap()
}

fn with_orphan() -> Page {
    let sections = vec![
        Section::new("intro", 2, "Intro", 0..10),
        Section::new("orphan", 2, "Orphan", 10..20),
        Section::new("methods", 2, "Methods", 20..30),
    ];
    let nav = vec![
        NavEntry::new("ct-intro", "intro"),
        NavEntry::new("ct-methods", "methods"),
    ];
    Page::new(sections, nav).unwrap()
}

#[test]
fn test_nothing_is_marked_before_the_first_notification() {
    let page = intro_and_methods();
    let _wired = highlight::init(&page, &Settings::default());
    assert!(page.entries_marked("current").is_empty());
    for entry in page.nav_entries() {
        assert!(entry.classes.is_empty(), "{} has classes", entry.id);
    }
}

#[test]
fn test_single_visible_section() {
    let mut page = intro_and_methods();
    let (highlighter, _) = highlight::init(&page, &Settings::default());

    highlighter
        .apply(&mut page, &[VisibilityRecord::new("intro", true)])
        .unwrap();

    assert!(page.nav_entry("ct-intro").unwrap().classes.contains("current"));
    assert!(page.nav_entry("ct-methods").unwrap().classes.is_empty());
}

#[test]
fn test_transition_batch_moves_the_marker() {
    let mut page = intro_and_methods();
    let (highlighter, _) = highlight::init(&page, &Settings::default());
    highlighter
        .apply(&mut page, &[VisibilityRecord::new("intro", true)])
        .unwrap();

    let report = highlighter
        .apply(
            &mut page,
            &[
                VisibilityRecord::new("intro", false),
                VisibilityRecord::new("methods", true),
            ],
        )
        .unwrap();

    assert_eq!(page.entries_marked("current"), vec!["ct-methods"]);
    assert_eq!((report.marked, report.cleared), (1, 1));
}

#[test]
fn test_missing_entry_is_skipped_by_default() {
    let mut page = with_orphan();
    let (highlighter, _) = highlight::init(&page, &Settings::default());
    highlighter
        .apply(&mut page, &[VisibilityRecord::new("intro", true)])
        .unwrap();

    // The orphan record is tolerated and the rest of the batch still applies.
    let report = highlighter
        .apply(
            &mut page,
            &[
                VisibilityRecord::new("orphan", true),
                VisibilityRecord::new("methods", true),
            ],
        )
        .unwrap();

    assert_eq!(report.skipped, vec![SectionId::from("orphan")]);
    assert_eq!(page.entries_marked("current"), vec!["ct-intro", "ct-methods"]);
}

#[test]
fn test_missing_entry_halts_batch_in_strict_mode() {
    let mut page = with_orphan();
    let settings = Settings {
        policy: MissingEntryPolicy::Halt,
        ..Settings::default()
    };
    let (highlighter, _) = highlight::init(&page, &settings);
    highlighter
        .apply(&mut page, &[VisibilityRecord::new("intro", true)])
        .unwrap();

    // Only the orphan record and the ones after it are not processed.
    let err = highlighter
        .apply(
            &mut page,
            &[
                VisibilityRecord::new("intro", false),
                VisibilityRecord::new("orphan", true),
                VisibilityRecord::new("methods", true),
            ],
        )
        .unwrap_err();

    assert!(matches!(err, Error::MissingEntry { ref entry, .. } if entry == "ct-orphan"));
    assert!(page.entries_marked("current").is_empty());
}

#[test]
fn test_observer_drives_highlighter_through_a_scroll() {
    let mut page = intro_and_methods();
    let (highlighter, mut observer) = highlight::init(&page, &Settings::default());
    let mut viewport = Viewport::new(80, 10, page.line_count());

    let initial = observer.take_records(&viewport);
    assert_eq!(initial.len(), 2, "first measurement reports every section");
    highlighter.apply(&mut page, &initial).unwrap();
    assert_eq!(page.entries_marked("current"), vec!["ct-intro"]);

    // rows 4..14: intro 60%, methods 40%
    viewport.scroll_down(4);
    highlighter
        .apply(&mut page, &observer.take_records(&viewport))
        .unwrap();
    assert_eq!(page.entries_marked("current"), vec!["ct-intro", "ct-methods"]);

    // rows 8..18: intro 20%, methods 80%
    viewport.scroll_down(4);
    let records = observer.take_records(&viewport);
    assert_eq!(records, vec![VisibilityRecord {
        target: SectionId::from("intro"),
        is_intersecting: false,
        ratio: 0.2,
    }]);
    highlighter.apply(&mut page, &records).unwrap();
    assert_eq!(page.entries_marked("current"), vec!["ct-methods"]);

    // No change, no records.
    assert!(observer.take_records(&viewport).is_empty());
}

#[test]
fn test_parsed_fixture_wires_every_heading() {
    let source = include_str!("fixtures/post.md");
    let page = Page::parse(source).unwrap();
    let ids: Vec<&str> = page.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "measuring-cold-starts",
            "introduction",
            "methods",
            "instrumentation",
            "sampling",
            "results",
            "results-2",
            "conclusion",
        ]
    );

    let (highlighter, observer) = highlight::init(&page, &Settings::default());
    assert_eq!(observer.len(), 8);
    assert!(highlighter.unmapped().is_empty());
    assert_eq!(
        highlighter.map().entry_for(&SectionId::from("results-2")),
        Some("ct-results-2")
    );
}
