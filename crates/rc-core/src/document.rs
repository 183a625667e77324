//! The root `<svg>` element: a [`Node`] with a reserved style group and
//! persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::children::{Child, Children, Container, DEFAULT_GROUP, Group};
use crate::error::PersistError;
use crate::node::Node;
use crate::style::StyleSheet;
use crate::value::{AttrValue, Attrs};

/// Namespace declared on every document.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Reserved group holding the document's [`StyleSheet`].
pub const STYLE_GROUP: &str = "style";

/// Extension appended by [`Document::persist`] when missing.
pub const FILE_EXTENSION: &str = "svg";

/// An SVG document.
///
/// Child order starts as `["style", "root"]`; sections registered later are
/// appended after the default group.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    node: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_attrs(Attrs::new())
    }

    /// A document with caller attributes (e.g. `viewBox`) followed by `xmlns`.
    pub fn with_attrs(mut attrs: Attrs) -> Self {
        attrs.set("xmlns", SVG_NAMESPACE);

        let mut children = Children::empty();
        children.register(
            STYLE_GROUP,
            Group::Items(vec![Child::Styles(StyleSheet::new())]),
        );
        children.register(DEFAULT_GROUP, Group::Items(Vec::new()));

        Self {
            node: Node::from_parts("svg", attrs, children),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.node.set_attr(key, value);
        self
    }

    /// Merge `props` into the style rule for `selector`.
    ///
    /// If the reserved style group was replaced by a section of the same
    /// name, the rule is dropped with a warning.
    pub fn add_style<I, K, V>(&mut self, selector: &str, props: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        match self.style_sheet_mut() {
            Some(sheet) => sheet.add_rule(selector, props),
            None => log::warn!("`{STYLE_GROUP}` group holds no stylesheet; rule `{selector}` dropped"),
        }
    }

    /// Read-only view of the registered style rules.
    pub fn style_sheet(&self) -> Option<&StyleSheet> {
        match self.node.children.groups.get(STYLE_GROUP) {
            Some(Group::Items(items)) => items.iter().find_map(|child| match child {
                Child::Styles(sheet) => Some(sheet),
                _ => None,
            }),
            _ => None,
        }
    }

    fn style_sheet_mut(&mut self) -> Option<&mut StyleSheet> {
        match self.node.children.groups.get_mut(STYLE_GROUP) {
            Some(Group::Items(items)) => items.iter_mut().find_map(|child| match child {
                Child::Styles(sheet) => Some(sheet),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Render the whole document, style block included.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.node.serialize(0)
    }

    /// Return the serialized document when `destination` is `None`,
    /// otherwise write it there (see [`write_to`](Self::write_to)).
    ///
    /// # Errors
    /// Returns [`PersistError::Write`] if the file cannot be written.
    pub fn persist(&self, destination: Option<&Path>) -> Result<Option<String>, PersistError> {
        match destination {
            None => Ok(Some(self.serialize())),
            Some(path) => {
                self.write_to(path)?;
                Ok(None)
            }
        }
    }

    /// Write the document to `path`, appending `.svg` unless the path
    /// already has that extension. Existing files are overwritten.
    /// Returns the path actually written.
    ///
    /// # Errors
    /// Returns [`PersistError::Write`] if the file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
        let path = with_svg_extension(path.as_ref());
        fs::write(&path, self.serialize()).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }
}

impl Container for Document {
    fn children(&self) -> &Children {
        &self.node.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.node.children
    }
}

fn with_svg_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_self_closes() {
        assert_eq!(
            Document::new().serialize(),
            r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#
        );
    }

    #[test]
    fn style_block_comes_first() {
        let mut doc = Document::new();
        doc.add("g", Attrs::new());
        doc.add_style("g", [("fill", "none")]);
        assert_eq!(
            doc.serialize(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n    <style>\n        g {\n            fill: none;\n        }\n    </style>\n    <g/>\n</svg>"
        );
    }

    #[test]
    fn style_rules_are_readable() {
        let mut doc = Document::new();
        doc.add_style(".m1", [("fill", "#ddd")]);
        doc.add_style(".m1", [("stroke", "white")]);
        let sheet = doc.style_sheet().unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rule(".m1").unwrap().len(), 2);
    }

    #[test]
    fn replacing_style_group_drops_rules() {
        let mut doc = Document::new();
        doc.add_section(STYLE_GROUP);
        doc.add_style("rect", [("fill", "red")]);
        assert!(doc.style_sheet().is_none());
        assert!(!doc.serialize().contains("<style>"));
    }

    #[test]
    fn extension_is_appended_when_missing() {
        assert_eq!(with_svg_extension(Path::new("Running 2022")), PathBuf::from("Running 2022.svg"));
        assert_eq!(with_svg_extension(Path::new("chart.v2")), PathBuf::from("chart.v2.svg"));
        assert_eq!(with_svg_extension(Path::new("out/chart.svg")), PathBuf::from("out/chart.svg"));
    }

    #[test]
    fn persist_without_destination_returns_markup() {
        let doc = Document::with_attrs(Attrs::new().with("viewBox", "0 0 1 1"));
        let text = doc.persist(None).unwrap();
        assert_eq!(
            text.as_deref(),
            Some(r#"<svg viewBox="0 0 1 1" xmlns="http://www.w3.org/2000/svg"/>"#)
        );
    }
}
