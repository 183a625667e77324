//! Aggregated style rules, rendered as one `<style>` block.

use indexmap::IndexMap;

use crate::children::indent;
use crate::value::AttrValue;

/// Ordered property → value map of a single rule.
pub type Properties = IndexMap<String, String>;

/// Selector → properties, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: IndexMap<String, Properties>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `props` into the rule for `selector`, creating it if needed.
    /// Properties set earlier for the same selector are kept unless overridden.
    pub fn add_rule<I, K, V>(&mut self, selector: &str, props: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let rule = self.rules.entry(selector.to_owned()).or_default();
        for (property, value) in props {
            rule.insert(property.into(), value.into().to_string());
        }
    }

    pub fn rule(&self, selector: &str) -> Option<&Properties> {
        self.rules.get(selector)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Properties)> {
        self.rules.iter().map(|(s, p)| (s.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render at depth 0. Empty sheets render as an empty string.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.write_to(&mut out, 0);
        }
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, depth: usize) {
        out.push_str("<style>");
        for (selector, props) in &self.rules {
            out.push('\n');
            indent(out, depth + 1);
            out.push_str(selector);
            out.push_str(" {");
            for (property, value) in props {
                out.push('\n');
                indent(out, depth + 2);
                out.push_str(property);
                out.push_str(": ");
                out.push_str(value);
                out.push(';');
            }
            out.push('\n');
            indent(out, depth + 1);
            out.push('}');
        }
        out.push('\n');
        indent(out, depth);
        out.push_str("</style>");
    }
}
