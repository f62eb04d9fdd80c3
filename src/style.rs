//! Inline style declarations.
//!
//! Inline style is stored in the element's `style` attribute. [`Declarations`]
//! parses that attribute into ordered `property: value` pairs, applies edits and
//! serializes it back. `style` and `style_js` share [`apply`]; they differ only
//! in the [`KeyCase`] used to turn a caller's key into a property name.

use crate::dom::{self, NodeRef};

/// Key naming convention for style maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// CSS property names, e.g. `background-color`.
    Dashed,
    /// Script-style property names, e.g. `backgroundColor`.
    Camel,
}

impl KeyCase {
    /// Translate a key to its CSS property name.
    #[must_use]
    pub fn property_name(self, key: &str) -> String {
        match self {
            Self::Dashed => key.trim().to_ascii_lowercase(),
            Self::Camel => camel_to_dashed(key.trim()),
        }
    }
}

/// Convert a camelCase style key to a dashed CSS property name.
///
/// `cssFloat` maps to `float`, vendor prefixes gain a leading dash
/// (`webkitTransform` → `-webkit-transform`) and keys that already contain a
/// dash are taken as written.
#[must_use]
pub fn camel_to_dashed(key: &str) -> String {
    if key.contains('-') {
        return key.to_ascii_lowercase();
    }
    if key == "cssFloat" {
        return "float".to_string();
    }

    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    const VENDOR_PREFIXES: &[&str] = &["webkit-", "moz-", "ms-", "o-"];
    if VENDOR_PREFIXES.iter().any(|p| out.starts_with(p)) {
        out.insert(0, '-');
    }
    out
}

/// Ordered inline style declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    /// Parse a `style` attribute value. Malformed declarations are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut decls = Self::default();
        for part in text.split(';') {
            let Some((name, value)) = part.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if !name.is_empty() && !value.is_empty() {
                decls.set(&name, value);
            }
        }
        decls
    }

    /// Read the declarations of an element.
    #[must_use]
    pub fn of(node: &NodeRef) -> Self {
        dom::get_attribute(node, "style")
            .map(|s| Self::parse(&s))
            .unwrap_or_default()
    }

    /// Value of a property, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, keeping its position if already declared.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Drop a property.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `name: value;` pairs separated by spaces.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write back to an element, removing the attribute when empty.
    pub fn write_to(&self, node: &NodeRef) {
        if self.is_empty() {
            dom::remove_attribute(node, "style");
        } else {
            dom::set_attribute(node, "style", &self.to_css());
        }
    }
}

/// Apply a style map to an element. `None` or an empty value clears the
/// property; anything else sets it.
pub fn apply<I, K, V>(node: &NodeRef, case: KeyCase, map: I)
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut decls = Declarations::of(node);
    for (key, value) in map {
        let name = case.property_name(key.as_ref());
        if name.is_empty() {
            continue;
        }
        match value.as_ref().map(|v| v.as_ref().trim()) {
            Some(v) if !v.is_empty() => decls.set(&name, v),
            _ => decls.remove(&name),
        }
    }
    decls.write_to(node);
}
