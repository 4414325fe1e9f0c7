//! Browser host: drives the highlighter from the DOM `IntersectionObserver`.
//!
//! The post page calls [`install_toc_highlighter`] once its markup is in
//! place (after `DOMContentLoaded`).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::Settings;
use crate::highlight::{Highlighter, NavMap, NavTarget};
use crate::observer::VisibilityRecord;
use crate::page::SectionId;

/// Selector of the section elements of a post.
pub const SECTION_SELECTOR: &str = ".post section";

/// Navigation entries looked up by element id in a live document.
#[derive(Debug, Clone)]
pub struct DomNav {
    document: Document,
}

impl DomNav {
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl NavTarget for DomNav {
    fn has_entry(&self, entry_id: &str) -> bool {
        self.document.get_element_by_id(entry_id).is_some()
    }

    fn set_marker(&mut self, entry_id: &str, class: &str, on: bool) -> bool {
        let Some(entry) = self.document.get_element_by_id(entry_id) else {
            return false;
        };
        let classes = entry.class_list();
        let result = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        // The entry exists; a rejected class name is not a missing entry.
        if let Err(err) = result {
            web_sys::console::error_2(
                &format!("tocmark: cannot update class `{class}` on `{entry_id}`:").into(),
                &err,
            );
        }
        true
    }
}

/// Convert a callback's entry array into records, in delivery order.
///
/// Values that are not `IntersectionObserverEntry`s are dropped.
pub fn records_from_entries(entries: &js_sys::Array) -> Vec<VisibilityRecord> {
    entries
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| VisibilityRecord {
            target: SectionId::from(entry.target().id()),
            is_intersecting: entry.is_intersecting(),
            ratio: entry.intersection_ratio(),
        })
        .collect()
}

/// Install the highlighter on the current window's document with default
/// settings (threshold 0.3, `current` marker, `ct-` entries).
///
/// # Errors
/// Fails when there is no document or the observer cannot be created.
#[wasm_bindgen(js_name = installTocHighlighter)]
pub fn install_toc_highlighter() -> Result<IntersectionObserver, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    install(&document, &Settings::default())
}

/// Subscribe every `.post section` of `document` and keep the marker class
/// on the matching navigation entries.
///
/// # Errors
/// Fails when the selector query or the observer construction fails.
pub fn install(document: &Document, settings: &Settings) -> Result<IntersectionObserver, JsValue> {
    let nodes = document.query_selector_all(SECTION_SELECTOR)?;
    let sections: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let ids: Vec<SectionId> = sections.iter().map(|s| SectionId::from(s.id())).collect();

    let mut nav = DomNav::new(document.clone());
    let map = NavMap::build(&ids, &nav, &settings.nav_prefix);
    for section in map.unmapped() {
        web_sys::console::warn_1(&format!("tocmark: section `{section}` has no navigation entry").into());
    }
    let highlighter = Highlighter::new(map, settings.marker_class.clone(), settings.policy);

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let records = records_from_entries(&entries);
            match highlighter.apply(&mut nav, &records) {
                Ok(report) => {
                    for section in &report.skipped {
                        web_sys::console::warn_1(
                            &format!("tocmark: skipped section `{section}`").into(),
                        );
                    }
                }
                Err(err) => web_sys::console::error_1(&format!("tocmark: {err}").into()),
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(settings.threshold.get()));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // The observer lives as long as the page; so does its callback.
    callback.forget();

    for section in &sections {
        observer.observe(section);
    }
    Ok(observer)
}
