//! DOM Operations Adapter
//!
//! The primitive element operations the wrapper composes, implemented on top of
//! the `dom_query` crate. Every function here addresses a single `NodeRef`; the
//! chainable surface lives in [`crate::html`].

// Re-export core types for external use
pub use dom_query::{Document, Matcher, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

use tracing::debug;

use crate::error::{Error, Result};

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
#[inline]
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    node.set_attr(name, value);
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

/// Get all attributes as key-value pairs, in source order.
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

// === Class List ===

/// Whether the element's class list contains `name`.
#[must_use]
pub fn has_class(node: &NodeRef, name: &str) -> bool {
    node.attr("class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == name))
}

/// A class token must be non-empty and free of ASCII whitespace.
#[must_use]
pub fn is_valid_class_token(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_ascii_whitespace())
}

fn checked_token(name: &str) -> bool {
    let valid = is_valid_class_token(name);
    if !valid {
        debug!(class = name, "ignoring class name that is not a single token");
    }
    valid
}

/// Idempotent add. Names that are not a single token are ignored.
pub fn add_class(node: &NodeRef, name: &str) {
    if checked_token(name) && !has_class(node, name) {
        node.add_class(name);
    }
}

/// Idempotent remove. Names that are not a single token are ignored.
pub fn remove_class(node: &NodeRef, name: &str) {
    if checked_token(name) && has_class(node, name) {
        node.remove_class(name);
    }
}

/// Flip membership of `name`. Returns the new membership state, or `None`
/// when `name` is not a single token and nothing changed.
pub fn toggle_class(node: &NodeRef, name: &str) -> Option<bool> {
    if !checked_token(name) {
        return None;
    }
    if has_class(node, name) {
        node.remove_class(name);
        Some(false)
    } else {
        node.add_class(name);
        Some(true)
    }
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check a tag name the way `createElement` does: a letter first, then no
/// whitespace, markup delimiters or quotes.
#[must_use]
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| {
            !c.is_whitespace() && !matches!(c, '<' | '>' | '/' | '=' | '"' | '\'' | '`' | '\0')
        })
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Replace all children with a single text node.
#[inline]
pub fn set_text(node: &NodeRef, text: &str) {
    node.set_text(text);
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> StrTendril {
    node.inner_html()
}

/// Replace all children with parsed markup. No escaping is applied.
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    node.set_html(html);
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> StrTendril {
    node.html()
}

// === Querying ===

/// Parse a CSS selector.
pub fn compile_selector(selector: &str) -> Result<Matcher> {
    Matcher::new(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))
}

/// First descendant of `scope` matching `matcher`, in document order.
#[must_use]
pub fn query_selector<'a>(scope: &NodeRef<'a>, matcher: &Matcher) -> Option<NodeRef<'a>> {
    Selection::from(scope.clone())
        .select_single_matcher(matcher)
        .nodes()
        .first()
        .cloned()
}

/// All descendants of `scope` matching `matcher`, in document order.
#[must_use]
pub fn query_selector_all<'a>(scope: &NodeRef<'a>, matcher: &Matcher) -> Vec<NodeRef<'a>> {
    Selection::from(scope.clone())
        .select_matcher(matcher)
        .nodes()
        .to_vec()
}

// === Tree Navigation ===

/// Parent element, or `None` for detached elements and the document node.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Whether `node` is `ancestor` or lies in its subtree.
#[must_use]
pub fn contains(ancestor: &NodeRef, node: &NodeRef) -> bool {
    let mut cursor = Some(node.clone());
    while let Some(current) = cursor {
        if current.id == ancestor.id {
            return true;
        }
        cursor = current.parent();
    }
    false
}

/// Whether two nodes live in the same document arena.
#[must_use]
pub fn same_tree(a: &NodeRef, b: &NodeRef) -> bool {
    std::ptr::eq(a.tree, b.tree)
}

/// Topmost ancestor of `node` (the node itself when detached).
#[must_use]
pub fn tree_root<'a>(node: &NodeRef<'a>) -> NodeRef<'a> {
    let mut current = node.clone();
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

// === Tree Manipulation ===

fn check_hierarchy(parent: &NodeRef, child: &NodeRef) -> Result<()> {
    if !same_tree(parent, child) {
        return Err(Error::WrongDocument {
            child: tag_name(child).unwrap_or_default(),
        });
    }
    if contains(child, parent) {
        return Err(Error::HierarchyRequest {
            child: tag_name(child).unwrap_or_default(),
        });
    }
    Ok(())
}

/// Move `child` to the end of `parent`'s children.
pub fn append_child(parent: &NodeRef, child: &NodeRef) -> Result<()> {
    check_hierarchy(parent, child)?;
    child.remove_from_parent();
    parent.append_child(child);
    Ok(())
}

/// Move `child` to the front of `parent`'s children.
pub fn prepend_child(parent: &NodeRef, child: &NodeRef) -> Result<()> {
    check_hierarchy(parent, child)?;
    child.remove_from_parent();
    parent.prepend_child(child);
    Ok(())
}

/// Detach an element from its parent. The node stays alive in the tree arena.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Direct element children, in order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
