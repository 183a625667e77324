//! Ordered markup tree builder for SVG output.
//!
//! Nodes carry ordered attributes and named child groups. Groups are
//! serialized in an explicit order, so regions of a document can be
//! reserved up front as [`Section`]s and populated later in any order.
//! A [`Document`] adds a single aggregated `<style>` block.

pub mod children;
pub mod document;
pub mod error;
pub mod node;
pub mod section;
pub mod style;
pub mod value;

pub use children::{Child, Children, Container, DEFAULT_GROUP, Group, INDENT};
pub use document::{Document, FILE_EXTENSION, STYLE_GROUP, SVG_NAMESPACE};
pub use error::{LookupError, PersistError};
pub use node::Node;
pub use section::Section;
pub use style::{Properties, StyleSheet};
pub use value::{AttrValue, Attrs, CLASS_ALIAS, format_num};
