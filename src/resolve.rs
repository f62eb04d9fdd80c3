//! Element-like inputs and the resolution strategy.
//!
//! Most wrapper methods accept "something that names an element": a raw
//! `NodeRef`, another wrapper, or a CSS selector. [`ElementRef`] is that tagged
//! input; [`Page::resolve`](crate::Page::resolve) turns it into a concrete node.

use std::fmt;

use crate::dom::NodeRef;
use crate::html::Html;

/// An element-like input.
#[derive(Clone)]
pub enum ElementRef<'a, 'r> {
    /// A concrete element.
    Element(NodeRef<'a>),
    /// The element currently bound to a wrapper.
    Wrapper(&'r Html<'a>),
    /// First match of a document-scoped query.
    Selector(&'r str),
}

impl<'a> From<NodeRef<'a>> for ElementRef<'a, '_> {
    fn from(node: NodeRef<'a>) -> Self {
        Self::Element(node)
    }
}

impl<'a> From<&NodeRef<'a>> for ElementRef<'a, '_> {
    fn from(node: &NodeRef<'a>) -> Self {
        Self::Element(node.clone())
    }
}

impl<'a, 'r> From<&'r Html<'a>> for ElementRef<'a, 'r> {
    fn from(html: &'r Html<'a>) -> Self {
        Self::Wrapper(html)
    }
}

impl<'r> From<&'r str> for ElementRef<'_, 'r> {
    fn from(selector: &'r str) -> Self {
        Self::Selector(selector)
    }
}

impl<'r> From<&'r String> for ElementRef<'_, 'r> {
    fn from(selector: &'r String) -> Self {
        Self::Selector(selector.as_str())
    }
}

impl fmt::Debug for ElementRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(node) => f.debug_tuple("Element").field(&node.id).finish(),
            Self::Wrapper(html) => f.debug_tuple("Wrapper").field(&html.elm().id).finish(),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
        }
    }
}

/// What to do when an element-like input resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Fail with [`Error::InvalidReference`](crate::Error::InvalidReference).
    Strict,
    /// Skip the operation and return successfully.
    Advisory,
}

/// A child argument for `append`/`prepend`.
///
/// A bare string is a tag name: a new element is created. Anything else names
/// an existing element, which is moved.
#[derive(Clone)]
pub enum Child<'a, 'r> {
    /// Create a new element with this tag.
    Tag(&'r str),
    /// Move an existing element.
    Existing(ElementRef<'a, 'r>),
}

impl<'r> From<&'r str> for Child<'_, 'r> {
    fn from(tag: &'r str) -> Self {
        Self::Tag(tag)
    }
}

impl<'a> From<NodeRef<'a>> for Child<'a, '_> {
    fn from(node: NodeRef<'a>) -> Self {
        Self::Existing(ElementRef::Element(node))
    }
}

impl<'a> From<&NodeRef<'a>> for Child<'a, '_> {
    fn from(node: &NodeRef<'a>) -> Self {
        Self::Existing(ElementRef::Element(node.clone()))
    }
}

impl<'a, 'r> From<&'r Html<'a>> for Child<'a, 'r> {
    fn from(html: &'r Html<'a>) -> Self {
        Self::Existing(ElementRef::Wrapper(html))
    }
}

impl<'a, 'r> From<ElementRef<'a, 'r>> for Child<'a, 'r> {
    fn from(target: ElementRef<'a, 'r>) -> Self {
        Self::Existing(target)
    }
}

impl fmt::Debug for Child<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Self::Existing(target) => f.debug_tuple("Existing").field(target).finish(),
        }
    }
}
