//! Named, ordered child groups shared by [`Node`], [`Section`] and
//! [`Document`](crate::Document).
//!
//! A container owns a map of group name → [`Group`] plus an explicit
//! `order` of names. Serialization walks `order`, not the map, so a section
//! registered early keeps its place no matter when it gets populated.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;

use crate::error::LookupError;
use crate::node::Node;
use crate::section::Section;
use crate::style::StyleSheet;
use crate::value::Attrs;

/// Name of the group that receives directly-added children.
pub const DEFAULT_GROUP: &str = "root";

/// Spaces per element nesting level.
pub const INDENT: usize = 4;

// ─── Children ────────────────────────────────────────────────────────────

/// A single entry of a [`Group::Items`] group.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// A nested element, rendered on its own indented line.
    Element(Node),
    /// Pre-rendered text, appended verbatim.
    Text(String),
    /// The document's aggregated `<style>` block.
    Styles(StyleSheet),
}

/// A named collection of children.
#[derive(Debug, Clone, PartialEq)]
pub enum Group {
    Items(Vec<Child>),
    /// Unwrapped grouping, spliced into the parent at the parent's depth.
    Section(Section),
}

/// The grouped-children state of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Children {
    pub(crate) groups: IndexMap<String, Group>,
    pub(crate) order: SmallVec<[String; 4]>,
}

impl Default for Children {
    fn default() -> Self {
        let mut children = Self::empty();
        children.register(DEFAULT_GROUP, Group::Items(Vec::new()));
        children
    }
}

impl Children {
    /// No groups at all, not even the default one.
    pub(crate) fn empty() -> Self {
        Self {
            groups: IndexMap::new(),
            order: SmallVec::new(),
        }
    }

    /// Group names in serialization order.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// `true` if serializing would write nothing.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|group| match group {
            Group::Items(items) => items.iter().all(Child::is_empty),
            Group::Section(section) => section.is_empty(),
        })
    }

    /// Store `group` under `name`. New names go to the end of the order;
    /// an existing name keeps its position and its group is replaced.
    pub(crate) fn register(&mut self, name: &str, group: Group) -> usize {
        if !self.order.iter().any(|n| n == name) {
            self.order.push(name.to_owned());
        }
        let (index, previous) = self.groups.insert_full(name.to_owned(), group);
        if previous.is_some() {
            log::debug!("child group `{name}` re-registered; previous content dropped");
        }
        index
    }

    pub(crate) fn register_section(&mut self, name: &str) -> &mut Section {
        let index = self.register(name, Group::Section(Section::default()));
        match &mut self.groups[index] {
            Group::Section(section) => section,
            Group::Items(_) => unreachable!("a section was just registered at this index"),
        }
    }

    pub(crate) fn section(&self, name: &str) -> Result<&Section, LookupError> {
        match self.groups.get(name) {
            Some(Group::Section(section)) => Ok(section),
            Some(Group::Items(_)) => Err(LookupError::NotASection(name.to_owned())),
            None => Err(LookupError::UnknownSection(name.to_owned())),
        }
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Result<&mut Section, LookupError> {
        match self.groups.get_mut(name) {
            Some(Group::Section(section)) => Ok(section),
            Some(Group::Items(_)) => Err(LookupError::NotASection(name.to_owned())),
            None => Err(LookupError::UnknownSection(name.to_owned())),
        }
    }

    /// The default group's entries. If the default name was re-registered
    /// as a section, children land in that section's own default group.
    pub(crate) fn default_items(&mut self) -> &mut Vec<Child> {
        if !self.groups.contains_key(DEFAULT_GROUP) {
            self.register(DEFAULT_GROUP, Group::Items(Vec::new()));
        }
        match self
            .groups
            .entry(DEFAULT_GROUP.to_owned())
            .or_insert_with(|| Group::Items(Vec::new()))
        {
            Group::Items(items) => items,
            Group::Section(section) => section.children.default_items(),
        }
    }

    pub(crate) fn push(&mut self, child: Child) {
        self.default_items().push(child);
    }

    pub(crate) fn push_node(&mut self, node: Node) -> &mut Node {
        let items = self.default_items();
        items.push(Child::Element(node));
        let Some(Child::Element(node)) = items.last_mut() else {
            unreachable!("an element was just pushed");
        };
        node
    }

    /// Render every group in `order` at `depth`. Returns `true` when
    /// element-level content was written.
    pub(crate) fn write_to(&self, out: &mut String, depth: usize) -> bool {
        let mut multiline = false;
        for name in &self.order {
            match self.groups.get(name) {
                Some(Group::Section(section)) => {
                    multiline |= section.children.write_to(out, depth);
                }
                Some(Group::Items(items)) => {
                    for child in items {
                        multiline |= child.write_to(out, depth);
                    }
                }
                None => log::warn!("child group `{name}` is in the order but has no content; skipped"),
            }
        }
        multiline
    }
}

impl Child {
    /// `true` if the child writes nothing: empty text or an empty stylesheet.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Element(_) => false,
            Self::Text(text) => text.is_empty(),
            Self::Styles(sheet) => sheet.is_empty(),
        }
    }

    fn write_to(&self, out: &mut String, depth: usize) -> bool {
        match self {
            Self::Element(node) => {
                out.push('\n');
                indent(out, depth + 1);
                node.write_to(out, depth + 1);
                true
            }
            Self::Text(text) => {
                out.push_str(text);
                false
            }
            Self::Styles(sheet) if sheet.is_empty() => false,
            Self::Styles(sheet) => {
                out.push('\n');
                indent(out, depth + 1);
                sheet.write_to(out, depth + 1);
                true
            }
        }
    }
}

pub(crate) fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth * INDENT {
        out.push(' ');
    }
}

// ─── Building API ────────────────────────────────────────────────────────

/// Anything that owns grouped children: nodes, sections and documents.
///
/// Every method targets the default group unless it names a section.
pub trait Container {
    fn children(&self) -> &Children;
    fn children_mut(&mut self) -> &mut Children;

    /// Append an element and return it for building its own subtree.
    fn add(&mut self, tag: &str, attrs: Attrs) -> &mut Node {
        self.children_mut().push_node(Node::with_attrs(tag, attrs))
    }

    /// Append an element whose sole child is `text`.
    fn add_text(&mut self, tag: &str, attrs: Attrs, text: impl fmt::Display) -> &mut Node {
        self.children_mut()
            .push_node(Node::with_text(tag, attrs, text))
    }

    /// Append raw text next to the element children.
    fn push_text(&mut self, text: impl fmt::Display) {
        self.children_mut().push(Child::Text(text.to_string()));
    }

    /// Register an empty section under `name` and return it.
    ///
    /// Registering a name twice replaces the earlier section but keeps its
    /// place in the output order.
    fn add_section(&mut self, name: &str) -> &mut Section {
        self.children_mut().register_section(name)
    }

    /// # Errors
    /// Returns a [`LookupError`] if `name` was never registered with
    /// [`add_section`](Self::add_section).
    fn get_section(&mut self, name: &str) -> Result<&mut Section, LookupError> {
        self.children_mut().section_mut(name)
    }

    /// Read-only counterpart of [`get_section`](Self::get_section).
    ///
    /// # Errors
    /// Returns a [`LookupError`] if `name` is not a registered section.
    fn section(&self, name: &str) -> Result<&Section, LookupError> {
        self.children().section(name)
    }

    /// Append `<rect x y width height …extra/>`.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, extra: Attrs) -> &mut Node {
        let mut attrs = Attrs::new()
            .with("x", x)
            .with("y", y)
            .with("width", width)
            .with("height", height);
        attrs.extend_missing(extra);
        self.add("rect", attrs)
    }

    /// Append `<circle cx cy r …extra/>`.
    fn circle(&mut self, cx: f64, cy: f64, r: f64, extra: Attrs) -> &mut Node {
        let mut attrs = Attrs::new().with("cx", cx).with("cy", cy).with("r", r);
        attrs.extend_missing(extra);
        self.add("circle", attrs)
    }
}
