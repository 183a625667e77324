//! Attribute values and the ordered attribute builder.
//!
//! Attributes keep insertion order, which is also their emission order.
//! Numbers are written in their shortest round-trip form (`10`, `0.6`,
//! `0.004`), with no trailing `.0` and no negative zero.

use indexmap::IndexMap;
use std::fmt;

/// Caller-facing key for the `class` attribute. Emitted as `class`.
pub const CLASS_ALIAS: &str = "class_name";

// ─── Values ──────────────────────────────────────────────────────────────

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Num(f64),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => f.write_str(&format_num(*n)),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        // Widen through the shortest `f32` text so `0.1_f32` stays `0.1`.
        Self::Num(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Format a number in the shortest form that parses back to the same value.
pub fn format_num(n: f64) -> String {
    if n == 0.0 {
        return "0".to_owned();
    }
    format!("{n}")
}

// ─── Attribute map ───────────────────────────────────────────────────────

/// Ordered attribute map with a chaining builder.
///
/// ```
/// use rc_core::Attrs;
///
/// let attrs = Attrs::new().with("fill", "red").with("opacity", 0.5).class("jan");
/// assert_eq!(attrs.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` and return the map for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Shorthand for `with(CLASS_ALIAS, class)`.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.with(CLASS_ALIAS, class.into())
    }

    /// Set `key`, keeping its original position if it was already present.
    /// Returns the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append the entries of `extra` whose keys are not set yet.
    pub(crate) fn extend_missing(&mut self, extra: Self) {
        for (key, value) in extra.0 {
            if self.0.contains_key(&key) {
                log::debug!("ignoring `{key}`: already set by shape geometry");
                continue;
            }
            self.0.insert(key, value);
        }
    }

    /// Write ` name="value"` pairs in insertion order.
    pub(crate) fn write_to(&self, out: &mut String) {
        use std::fmt::Write;

        for (key, value) in &self.0 {
            let name = if key == CLASS_ALIAS { "class" } else { key.as_str() };
            let _ = write!(out, " {name}=\"{value}\"");
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_shortest_form() {
        assert_eq!(format_num(10.0), "10");
        assert_eq!(format_num(0.6), "0.6");
        assert_eq!(format_num(12.345_6), "12.3456");
        assert_eq!(format_num(-3.0), "-3");
        assert_eq!(format_num(-0.0), "0");
    }

    #[test]
    fn small_numbers_keep_their_precision() {
        let attrs = Attrs::new()
            .with("r", 0.004)
            .with("opacity", 0.125)
            .with("x", -0.001)
            .with("y", 0.1_f32);
        let mut out = String::new();
        attrs.write_to(&mut out);
        assert_eq!(out, r#" r="0.004" opacity="0.125" x="-0.001" y="0.1""#);
    }

    #[test]
    fn reset_keeps_position() {
        let mut attrs = Attrs::new().with("a", 1).with("b", 2);
        let previous = attrs.set("a", 3);
        assert_eq!(previous, Some(AttrValue::Int(1)));
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(attrs.get("a"), Some(&AttrValue::Int(3)));
    }

    #[test]
    fn class_alias_is_renamed_on_output() {
        let attrs = Attrs::new().class("m1").with("fill", "red");
        let mut out = String::new();
        attrs.write_to(&mut out);
        assert_eq!(out, r#" class="m1" fill="red""#);
    }

    #[test]
    fn extend_missing_keeps_existing_keys() {
        let mut attrs = Attrs::new().with("x", 0);
        attrs.extend_missing(Attrs::new().with("x", 5).with("fill", "blue"));
        let mut out = String::new();
        attrs.write_to(&mut out);
        assert_eq!(out, r#" x="0" fill="blue""#);
    }

    #[test]
    fn collects_from_pairs() {
        let attrs: Attrs = [("stroke", "none"), ("fill", "#fff")].into_iter().collect();
        assert_eq!(attrs.get("fill"), Some(&AttrValue::Str("#fff".into())));
    }
}
