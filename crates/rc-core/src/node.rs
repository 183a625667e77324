//! Generic markup element: a tag, ordered attributes and grouped children.
//!
//! Serialization rules:
//! - element children go on their own line, one indentation level deeper;
//! - text children are written inline;
//! - a node without any emitted content self-closes (`<tag/>`).

use std::fmt;

use crate::children::{Child, Children, Container, indent};
use crate::value::{AttrValue, Attrs};

/// A tagged element in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    attributes: Attrs,
    pub(crate) children: Children,
}

impl Node {
    /// An element without attributes or children.
    pub fn new(tag: &str) -> Self {
        Self::with_attrs(tag, Attrs::new())
    }

    pub fn with_attrs(tag: &str, attrs: Attrs) -> Self {
        Self::from_parts(tag, attrs, Children::default())
    }

    /// An element whose only child is the string form of `text`.
    pub fn with_text(tag: &str, attrs: Attrs, text: impl fmt::Display) -> Self {
        let mut node = Self::with_attrs(tag, attrs);
        node.children.push(Child::Text(text.to_string()));
        node
    }

    pub(crate) fn from_parts(tag: &str, attributes: Attrs, children: Children) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes,
            children,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attrs {
        &self.attributes
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Set an attribute after construction. Existing keys keep their position.
    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Render this node and its descendants. `depth` is the node's own
    /// nesting level; the opening tag itself is not indented.
    #[must_use]
    pub fn serialize(&self, depth: usize) -> String {
        let mut out = String::with_capacity(64);
        self.write_to(&mut out, depth);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, depth: usize) {
        out.push('<');
        out.push_str(&self.tag);
        self.attributes.write_to(out);

        let mut body = String::new();
        let multiline = self.children.write_to(&mut body, depth);

        if body.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        out.push_str(&body);
        if multiline {
            out.push('\n');
            indent(out, depth);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Container for Node {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(0))
    }
}
