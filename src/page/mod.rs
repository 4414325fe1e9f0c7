//! The page the highlighter works against.
//!
//! This module handles:
//! - Rendering markdown into body rows with comrak
//! - Wrapping every heading's content in a (possibly nested) section
//! - Producing one table-of-contents entry per section

mod parser;
mod types;

pub use parser::{ParseOptions, parse, parse_with_options, title_to_slug};
pub use types::{
    ClassList, DEFAULT_NAV_PREFIX, NavEntry, Page, Row, RowKind, Section, SectionId,
};
