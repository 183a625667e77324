//! Sections: named regions without a wrapping element.
//!
//! A section is registered on a parent up front and filled later, in any
//! order. Its children are spliced into the parent's output at the
//! section's position and at the parent's own depth.

use crate::children::{Children, Container};

/// A child-only container with no tag and no attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub(crate) children: Children,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the section would splice nothing into its parent.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Container for Section {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}
