use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Settings;
use crate::highlight::MissingEntryPolicy;
use crate::page::{NavEntry, Page, Section};

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, update};

/// Three 14-row sections: intro 0..14, methods 14..28, results 28..42.
fn create_test_model() -> Model {
    let mut md = String::new();
    for name in ["Intro", "Methods", "Results"] {
        md.push_str(&format!("## {name}\n\n"));
        for i in 0..6 {
            md.push_str(&format!("{name} paragraph {i}.\n\n"));
        }
    }
    let page = Page::parse(&md).unwrap();
    Model::new(PathBuf::from("post.md"), page, (80, 11), Settings::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_initial_batch_marks_visible_section() {
    let model = create_test_model();
    assert_eq!(model.current_entries(), vec!["ct-intro"]);
}

#[test]
fn test_scroll_moves_marker_to_next_section() {
    let model = create_test_model();
    // viewport rows 12..22: intro 2/14, methods 8/14
    let model = update(model, Message::ScrollDown(12));
    assert_eq!(model.current_entries(), vec!["ct-methods"]);
}

#[test]
fn test_two_sections_can_be_current_at_once() {
    let model = create_test_model();
    // viewport rows 9..19: intro 5/14 (36%), methods 5/14 (36%)
    let model = update(model, Message::ScrollDown(9));
    assert_eq!(model.current_entries(), vec!["ct-intro", "ct-methods"]);
}

#[test]
fn test_scroll_back_restores_marker() {
    let model = create_test_model();
    let model = update(model, Message::GoToBottom);
    assert_eq!(model.current_entries(), vec!["ct-results"]);
    let model = update(model, Message::GoToTop);
    assert_eq!(model.current_entries(), vec!["ct-intro"]);
}

#[test]
fn test_jump_to_entry_scrolls_section_to_top() {
    let model = create_test_model();
    let model = update(model, Message::JumpToEntry(1));
    assert_eq!(model.viewport.offset(), 14);
    assert_eq!(model.current_entries(), vec!["ct-methods"]);
}

#[test]
fn test_jump_to_missing_entry_is_noop() {
    let model = create_test_model();
    let model = update(model, Message::JumpToEntry(42));
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_toggle_toc_reflows_and_keeps_markers() {
    let model = create_test_model();
    assert!(!model.toc_visible);
    let model = update(model, Message::ToggleToc);
    assert!(model.toc_visible);
    assert_eq!(model.current_entries(), vec!["ct-intro"]);
}

#[test]
fn test_resize_reconnects_observer() {
    let model = create_test_model();
    let model = update(model, Message::Resize(80, 41));
    // 40 visible rows: every section is at least 30% on screen
    assert_eq!(
        model.current_entries(),
        vec!["ct-intro", "ct-methods", "ct-results"]
    );
}

#[test]
fn test_help_toggle_and_quit() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_halt_policy_surfaces_error() {
    let sections = vec![
        Section::new("intro", 2, "Intro", 0..10),
        Section::new("orphan", 2, "Orphan", 10..20),
    ];
    let page = Page::new(sections, vec![NavEntry::new("ct-intro", "intro")]).unwrap();
    let settings = Settings {
        policy: MissingEntryPolicy::Halt,
        ..Settings::default()
    };
    // The initial batch reports intro (applied) and then orphan (halts).
    let model = Model::new(PathBuf::from("post.md"), page, (80, 11), settings);
    assert_eq!(model.current_entries(), vec!["ct-intro"]);
    assert!(
        model
            .last_error
            .as_deref()
            .is_some_and(|e| e.contains("ct-orphan"))
    );

    let model = update(model, Message::GoToBottom);
    assert!(model.current_entries().is_empty());
    assert!(model.last_error.is_some());
}

#[test]
fn test_skip_policy_counts_unmapped_sections() {
    let sections = vec![Section::new("orphan", 2, "Orphan", 0..10)];
    let page = Page::new(sections, Vec::new()).unwrap();
    let model = Model::new(PathBuf::from("post.md"), page, (80, 11), Settings::default());
    assert_eq!(model.unmapped_count(), 1);
    assert_eq!(model.last_report.skipped.len(), 1);
    assert!(model.last_error.is_none());
}

#[test]
fn test_key_mapping() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), Some(Message::ScrollDown(1)));
    assert_eq!(App::handle_key(key(KeyCode::Char('G')), &model), Some(Message::GoToBottom));
    assert_eq!(App::handle_key(key(KeyCode::Char('t')), &model), Some(Message::ToggleToc));
    assert_eq!(App::handle_key(key(KeyCode::Char('2')), &model), Some(Message::JumpToEntry(1)));
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(key(KeyCode::Char('z')), &model), None);
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), Some(Message::HideHelp));
}

#[test]
fn test_mouse_wheel_scrolls() {
    let model = create_test_model();
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 10,
        row: 5,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(App::handle_mouse(wheel, &model), Some(Message::ScrollDown(3)));
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(&Event::Resize(100, 30), &model, 0, &mut debouncer);
    assert_eq!(msg, None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(50), None);
    assert_eq!(debouncer.take_ready(100), Some((100, 30)));
    assert!(!debouncer.is_pending());
}
