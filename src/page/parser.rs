//! Markdown to page rendering with comrak.
//!
//! Every heading opens a section that stays open until a heading of the same
//! or a higher rank appears, so sections nest the way the post markup nests
//! `<section>` elements.

use std::collections::HashSet;

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{DEFAULT_NAV_PREFIX, NavEntry, Page, Row, RowKind, Section, SectionId};
use crate::error::Result;

/// Layout and naming options for [`parse_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Wrap width of body rows in columns
    pub width: u16,
    /// Prefix joining a section id to its navigation entry id
    pub nav_prefix: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            width: 80,
            nav_prefix: DEFAULT_NAV_PREFIX.to_string(),
        }
    }
}

/// Parse markdown source into a page.
///
/// # Example
///
/// ```
/// use tocmark::page::Page;
///
/// let page = Page::parse("# Intro\n\nHello\n\n## Methods\n\nWorld").unwrap();
/// assert_eq!(page.sections().len(), 2);
/// assert!(page.nav_entry("ct-methods").is_some());
/// ```
impl Page {
    /// # Errors
    /// Returns an error when the rendered sections cannot form a page.
    pub fn parse(source: &str) -> Result<Self> {
        parse(source)
    }

    /// # Errors
    /// Returns an error when the rendered sections cannot form a page.
    pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Self> {
        parse_with_options(source, options)
    }
}

/// Parse markdown with default options (80 columns, `ct-` entries).
///
/// # Errors
/// Returns an error when the rendered sections cannot form a page.
pub fn parse(source: &str) -> Result<Page> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse markdown with explicit layout width and entry prefix.
///
/// # Errors
/// Returns an error when the rendered sections cannot form a page.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Page> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());

    let mut renderer = Renderer::new(options.width);
    renderer.block(root, "");
    let (rows, sections) = renderer.finish();

    let nav = sections
        .iter()
        .map(|section| {
            NavEntry::new(format!("{}{}", options.nav_prefix, section.id), section.id.clone())
                .with_text(section.title.clone(), section.level)
        })
        .collect();

    Page::from_rendered(source.to_string(), rows, sections, nav)
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options
}

/// Derive a section id from heading text.
///
/// Lower-cases, turns every non-alphanumeric character into `-` and
/// collapses the resulting runs.
pub fn title_to_slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Split a trailing `{#id}` attribute off heading text.
fn split_explicit_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    if let Some(open) = trimmed.rfind("{#")
        && trimmed.ends_with('}')
    {
        let id = trimmed[open + 2..trimmed.len() - 1].trim();
        if !id.is_empty() && !id.contains(char::is_whitespace) {
            return (trimmed[..open].trim_end(), Some(id));
        }
    }
    (text, None)
}

struct OpenSection {
    index: usize,
    level: u8,
}

struct Renderer {
    width: usize,
    rows: Vec<Row>,
    sections: Vec<Section>,
    open: Vec<OpenSection>,
    used_ids: HashSet<String>,
    quote_depth: usize,
}

impl Renderer {
    fn new(width: u16) -> Self {
        Self {
            width: usize::from(width.max(1)),
            rows: Vec::new(),
            sections: Vec::new(),
            open: Vec::new(),
            used_ids: HashSet::new(),
            quote_depth: 0,
        }
    }

    fn finish(mut self) -> (Vec<Row>, Vec<Section>) {
        self.close_sections(0);
        (self.rows, self.sections)
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, prefix: &str) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                self.heading(heading.level, &extract_text(node), &extract_plain_text(node));
            }
            NodeValue::Paragraph => {
                let kind = if self.quote_depth > 0 {
                    RowKind::Quote
                } else {
                    RowKind::Paragraph
                };
                self.wrapped(&extract_text(node), prefix, prefix, kind);
                self.blank();
            }
            NodeValue::List(_) => {
                for (i, item) in node.children().enumerate() {
                    self.list_item(item, prefix, i);
                }
                self.blank();
            }
            NodeValue::BlockQuote => {
                let nested = format!("{prefix}│ ");
                self.quote_depth += 1;
                for child in node.children() {
                    self.block(child, &nested);
                }
                self.quote_depth -= 1;
            }
            NodeValue::CodeBlock(code) => {
                for line in code.literal.lines() {
                    self.rows
                        .push(Row::new(format!("{prefix}    {line}"), RowKind::Code));
                }
                self.blank();
            }
            NodeValue::ThematicBreak => {
                let rule = "─".repeat(self.width.saturating_sub(prefix.width()).max(1));
                self.rows.push(Row::new(format!("{prefix}{rule}"), RowKind::Rule));
                self.blank();
            }
            NodeValue::TableRow(_) => {
                let cells: Vec<String> = node.children().map(extract_text).collect();
                self.wrapped(&cells.join(" │ "), prefix, prefix, RowKind::Paragraph);
            }
            NodeValue::HtmlBlock(_) | NodeValue::FrontMatter(_) => {}
            _ => {
                for child in node.children() {
                    self.block(child, prefix);
                }
                if matches!(&node.data.borrow().value, NodeValue::Table(_)) {
                    self.blank();
                }
            }
        }
    }

    fn list_item<'a>(&mut self, item: &'a AstNode<'a>, prefix: &str, index: usize) {
        let bullet = match &item.data.borrow().value {
            NodeValue::Item(list) if list.list_type == comrak::nodes::ListType::Ordered => {
                format!("{}. ", list.start + index)
            }
            NodeValue::TaskItem(Some(_)) => "[x] ".to_string(),
            NodeValue::TaskItem(None) => "[ ] ".to_string(),
            _ => "• ".to_string(),
        };
        let first = format!("{prefix}{bullet}");
        let rest = format!("{prefix}{}", " ".repeat(bullet.width()));
        let mut first_block = true;
        for child in item.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let lead = if first_block { &first } else { &rest };
                    self.wrapped(&extract_text(child), lead, &rest, RowKind::ListItem);
                }
                NodeValue::List(_) => {
                    for (i, nested) in child.children().enumerate() {
                        self.list_item(nested, &rest, i);
                    }
                }
                _ => self.block(child, &rest),
            }
            first_block = false;
        }
    }

    /// `raw` is the display title; `plain` holds only its text nodes and
    /// feeds the slug.
    fn heading(&mut self, level: u8, raw: &str, plain: &str) {
        let (title, explicit) = split_explicit_id(raw);
        let title = title.to_string();
        let (plain, _) = split_explicit_id(plain);
        let id = self.unique_id(explicit.map_or_else(|| title_to_slug(plain), str::to_string));

        self.close_sections(level);
        if !self.rows.is_empty() {
            self.ensure_trailing_blank(1);
        }
        let start = self.rows.len();
        self.rows.push(Row::new(
            format!("{} {}", "#".repeat(usize::from(level)), title),
            RowKind::Heading(level),
        ));
        self.rows.push(Row::empty());

        self.open.push(OpenSection {
            index: self.sections.len(),
            level,
        });
        self.sections.push(Section::new(id, level, title, start..start));
    }

    /// Close every open section ranked at or below `level` (0 closes all).
    fn close_sections(&mut self, level: u8) {
        let end = self.rows.len();
        while let Some(top) = self.open.last() {
            if level != 0 && top.level < level {
                break;
            }
            self.sections[top.index].rows.end = end;
            self.open.pop();
        }
    }

    fn unique_id(&mut self, base: String) -> SectionId {
        let base = if base.is_empty() {
            format!("section-{}", self.sections.len() + 1)
        } else {
            base
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while self.used_ids.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.used_ids.insert(candidate.clone());
        SectionId::from(candidate)
    }

    fn wrapped(&mut self, text: &str, first_prefix: &str, rest_prefix: &str, kind: RowKind) {
        for line in wrap_text(text, self.width, first_prefix, rest_prefix) {
            self.rows.push(Row::new(line, kind));
        }
    }

    fn blank(&mut self) {
        self.ensure_trailing_blank(1);
    }

    fn ensure_trailing_blank(&mut self, count: usize) {
        let existing = self
            .rows
            .iter()
            .rev()
            .take_while(|row| row.kind() == RowKind::Empty)
            .count();
        for _ in existing..count {
            self.rows.push(Row::empty());
        }
    }
}

/// Greedy word wrap; words wider than a row are split by character.
fn wrap_text(text: &str, width: usize, first_prefix: &str, rest_prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut current = String::from(if lines.is_empty() { first_prefix } else { rest_prefix });
        let mut current_width = current.width();
        let mut has_word = false;
        for word in source_line.split_whitespace() {
            let word_width = word.width();
            let sep = usize::from(has_word);
            if has_word && current_width + sep + word_width > width {
                lines.push(std::mem::replace(&mut current, rest_prefix.to_string()));
                current_width = rest_prefix.width();
                has_word = false;
            }
            if has_word {
                current.push(' ');
                current_width += 1;
            }
            if current_width + word_width <= width {
                current.push_str(word);
                current_width += word_width;
            } else {
                for c in word.chars() {
                    let cw = c.width().unwrap_or(0);
                    if current_width + cw > width && current_width > rest_prefix.width() {
                        lines.push(std::mem::replace(&mut current, rest_prefix.to_string()));
                        current_width = rest_prefix.width();
                    }
                    current.push(c);
                    current_width += cw;
                }
            }
            has_word = true;
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(first_prefix.to_string());
    }
    lines
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => {
            text.push('`');
            text.push_str(&c.literal);
            text.push('`');
        }
        NodeValue::SoftBreak => text.push(' '),
        NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Text nodes only; inline code and markup are left out.
fn extract_plain_text<'a>(node: &'a AstNode<'a>) -> String {
    node.descendants()
        .filter_map(|n| match &n.data.borrow().value {
            NodeValue::Text(t) => Some(t.to_string()),
            NodeValue::SoftBreak => Some(" ".to_string()),
            _ => None,
        })
        .collect()
}
