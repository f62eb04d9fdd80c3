//! The document scope.
//!
//! A [`Page`] owns one element tree plus the listeners attached to its
//! elements. Every [`Html`] wrapper borrows the page it was created from, and
//! the document-scoped queries (`qs`, `qsa`, selector resolution) search this
//! page's tree rather than any process-wide document.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace};

use crate::dom::{self, Document, NodeRef, StrTendril};
use crate::error::{Error, Result};
use crate::events::{Event, Listener, ListenerStore, Phase};
use crate::html::Html;
use crate::options::Options;
use crate::resolve::{ElementRef, Resolution};

/// An element tree and its event listeners.
///
/// Listeners are keyed by element and live as long as the page. Detaching an
/// element with [`Html::cleanup`] or [`Html::clear`] does not unregister its
/// listeners: they stay in place (and fire again if the element is
/// re-inserted and receives an event) until removed with [`Html::un`] or the
/// page is dropped.
pub struct Page {
    doc: Document,
    listeners: RefCell<ListenerStore>,
    options: Options,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// An empty document (`<html><head></head><body></body></html>`).
    #[must_use]
    pub fn new() -> Self {
        Self::from_html("")
    }

    /// Parse `html` into a new page with default options.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self::with_options(html, Options::default())
    }

    /// Parse `html` into a new page with custom options.
    #[must_use]
    pub fn with_options(html: &str, options: Options) -> Self {
        Self {
            doc: dom::parse(html),
            listeners: RefCell::new(ListenerStore::default()),
            options,
        }
    }

    /// Options this page was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document node. Static queries search beneath it.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.doc.root()
    }

    /// Wrapper for `<body>`, if the document has one.
    #[must_use]
    pub fn body(&self) -> Option<Html<'_>> {
        self.doc
            .select("body")
            .nodes()
            .first()
            .map(|node| Html::adopt(self, node.clone()))
    }

    /// Serialized document markup.
    #[must_use]
    pub fn html(&self) -> StrTendril {
        self.doc.html()
    }

    /// Create a new, detached element wrapped in an [`Html`].
    pub fn create(&self, tag: &str) -> Result<Html<'_>> {
        Html::new(self, tag)
    }

    /// Create a detached element. An empty tag uses `Options::default_tag`.
    pub(crate) fn create_element(&self, tag: &str) -> Result<NodeRef<'_>> {
        let tag = tag.trim();
        let tag = if tag.is_empty() {
            self.options.default_tag.as_str()
        } else {
            tag
        };
        if !dom::is_valid_tag_name(tag) {
            return Err(Error::InvalidTagName(tag.to_string()));
        }
        let node = self.doc.tree.new_element(&tag.to_ascii_lowercase());
        trace!(tag, node = ?node.id, "created element");
        Ok(node)
    }

    // === Static queries ===

    /// First element in the document matching `selector`, unwrapped.
    pub fn query(&self, selector: &str) -> Result<Option<NodeRef<'_>>> {
        let matcher = dom::compile_selector(selector)?;
        Ok(dom::query_selector(&self.root(), &matcher))
    }

    /// First element in the document matching `selector`, wrapped.
    /// `None` when nothing matches.
    pub fn qs(&self, selector: &str) -> Result<Option<Html<'_>>> {
        self.qs_in(&self.root(), selector)
    }

    /// Every element in the document matching `selector`, wrapped, in
    /// document order. `None` (not an empty vector) when nothing matches.
    pub fn qsa(&self, selector: &str) -> Result<Option<Vec<Html<'_>>>> {
        self.qsa_in(&self.root(), selector)
    }

    /// First descendant of `scope` matching `selector`, wrapped.
    pub(crate) fn qs_in<'a>(
        &'a self,
        scope: &NodeRef<'a>,
        selector: &str,
    ) -> Result<Option<Html<'a>>> {
        let matcher = dom::compile_selector(selector)?;
        Ok(dom::query_selector(scope, &matcher).map(|node| Html::adopt(self, node)))
    }

    /// Every descendant of `scope` matching `selector`, wrapped. An empty
    /// result is `None`.
    pub(crate) fn qsa_in<'a>(
        &'a self,
        scope: &NodeRef<'a>,
        selector: &str,
    ) -> Result<Option<Vec<Html<'a>>>> {
        let matcher = dom::compile_selector(selector)?;
        let nodes = dom::query_selector_all(scope, &matcher);
        if nodes.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            nodes.into_iter().map(|node| Html::adopt(self, node)).collect(),
        ))
    }

    /// Adopt an element, or look one up if given a selector.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_target<'a, 'r>(
        &'a self,
        target: impl Into<ElementRef<'a, 'r>>,
    ) -> Result<Option<Html<'a>>>
    where
        'a: 'r,
    {
        Ok(self
            .resolve(target, Resolution::Advisory)?
            .map(|node| Html::adopt(self, node)))
    }

    // === Resolution ===

    /// Resolve an element-like input, failing if it names nothing.
    pub fn get_element<'a, 'r>(
        &'a self,
        target: impl Into<ElementRef<'a, 'r>>,
    ) -> Result<NodeRef<'a>>
    where
        'a: 'r,
    {
        match self.resolve(target, Resolution::Strict)? {
            Some(node) => Ok(node),
            None => Err(Error::InvalidReference("unresolved element".to_string())),
        }
    }

    /// Resolve an element-like input.
    ///
    /// Elements are returned as-is, wrappers yield their current element and
    /// selectors are looked up in this document. A selector with no match is an
    /// error under [`Resolution::Strict`] and `Ok(None)` under
    /// [`Resolution::Advisory`]. A malformed selector is always an error, and
    /// so is an element or wrapper belonging to another page
    /// ([`Error::WrongDocument`]).
    pub fn resolve<'a, 'r>(
        &'a self,
        target: impl Into<ElementRef<'a, 'r>>,
        resolution: Resolution,
    ) -> Result<Option<NodeRef<'a>>>
    where
        'a: 'r,
    {
        match target.into() {
            ElementRef::Element(node) => self.owned(node).map(Some),
            ElementRef::Wrapper(html) => {
                if !std::ptr::eq(html.page(), self) {
                    return Err(foreign(html.elm()));
                }
                self.owned(html.elm().clone()).map(Some)
            }
            ElementRef::Selector(selector) => match self.query(selector)? {
                Some(node) => Ok(Some(node)),
                None if resolution == Resolution::Strict => Err(Error::InvalidReference(
                    format!("no element matches {selector:?}"),
                )),
                None => {
                    debug!(selector, "advisory target not found, skipping");
                    Ok(None)
                }
            },
        }
    }

    /// Whether `node` belongs to this page's tree, attached or not.
    #[must_use]
    pub fn owns(&self, node: &NodeRef) -> bool {
        std::ptr::eq(node.tree, &self.doc.tree)
    }

    fn owned<'a>(&self, node: NodeRef<'a>) -> Result<NodeRef<'a>> {
        if self.owns(&node) {
            Ok(node)
        } else {
            Err(foreign(&node))
        }
    }

    /// Whether `node` is reachable from the document node.
    #[must_use]
    pub fn is_attached(&self, node: &NodeRef) -> bool {
        self.owns(node) && dom::tree_root(node).id == self.root().id
    }

    // === Events ===

    pub(crate) fn add_listener(&self, node: &NodeRef, event: &str, listener: &Listener) {
        let added = self.listeners.borrow_mut().add(
            node.id,
            event,
            listener.clone(),
            self.options.dedupe_listeners,
        );
        if !added {
            trace!(event, node = ?node.id, "listener already registered");
        }
    }

    pub(crate) fn remove_listener(&self, node: &NodeRef, event: &str, listener: &Listener) {
        if !self.listeners.borrow_mut().remove(node.id, event, listener) {
            trace!(event, node = ?node.id, "no matching listener to remove");
        }
    }

    /// Number of listeners registered on `node` for `event`.
    #[must_use]
    pub fn listener_count(&self, node: &NodeRef, event: &str) -> usize {
        self.listeners.borrow().count(node.id, event)
    }

    /// Dispatch a synthetic event at `target`.
    ///
    /// Listeners on the target run first, then listeners on each ancestor up to
    /// the document node. Each element's listener list is snapshotted before
    /// its listeners run, so listeners may attach or detach others freely.
    pub fn dispatch(&self, target: &NodeRef, event_type: &str) -> Event {
        let event = Event::new(event_type, target.id);
        debug!(event = event_type, target = ?target.id, "dispatching event");

        let mut cursor = Some(target.clone());
        let mut phase = Phase::AtTarget;
        while let Some(node) = cursor {
            event.enter(node.id, phase);
            let listeners = self.listeners.borrow().get(node.id, event_type);
            for listener in listeners {
                listener(&event);
                if event.immediate_stopped() {
                    break;
                }
            }
            if event.propagation_stopped() {
                break;
            }
            cursor = node.parent();
            phase = Phase::Bubbling;
        }

        event.finish();
        event
    }
}

fn foreign(node: &NodeRef) -> Error {
    Error::WrongDocument {
        child: dom::tag_name(node).unwrap_or_default(),
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("options", &self.options)
            .field("listeners", &self.listeners.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_has_body() {
        let page = Page::new();
        let body = page.body().unwrap();
        assert_eq!(body.tag_name(), "body");
        assert!(body.get_html().is_empty());
    }

    #[test]
    fn test_create_element_uses_default_tag() {
        let page = Page::new();
        let node = page.create_element("").unwrap();
        assert_eq!(dom::tag_name(&node).as_deref(), Some("div"));

        let page = Page::with_options(
            "",
            Options {
                default_tag: "section".to_string(),
                ..Options::default()
            },
        );
        let node = page.create_element("  ").unwrap();
        assert_eq!(dom::tag_name(&node).as_deref(), Some("section"));
    }

    #[test]
    fn test_create_element_lowercases_and_validates() {
        let page = Page::new();
        let node = page.create_element("SPAN").unwrap();
        assert_eq!(dom::tag_name(&node).as_deref(), Some("span"));

        assert!(matches!(
            page.create_element("bad tag"),
            Err(Error::InvalidTagName(tag)) if tag == "bad tag"
        ));
    }

    #[test]
    fn test_created_element_is_detached() {
        let page = Page::new();
        let node = page.create_element("p").unwrap();
        assert!(!page.is_attached(&node));
        assert!(page.query("p").unwrap().is_none());
    }

    #[test]
    fn test_resolve_strategies() {
        let page = Page::from_html(r#"<div id="a"></div>"#);

        let found = page.resolve("#a", Resolution::Strict).unwrap().unwrap();
        assert_eq!(dom::get_attribute(&found, "id").as_deref(), Some("a"));

        assert!(matches!(
            page.resolve("#missing", Resolution::Strict),
            Err(Error::InvalidReference(_))
        ));
        assert_eq!(
            page.resolve("#missing", Resolution::Advisory).unwrap().map(|n| n.id),
            None
        );
        assert!(matches!(
            page.resolve("[[", Resolution::Advisory),
            Err(Error::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_resolve_wrapper_uses_current_binding() {
        let page = Page::from_html(r#"<p id="one"></p><p id="two"></p>"#);
        let mut html = page.qs("#one").unwrap().unwrap();
        let two = page.query("#two").unwrap().unwrap();
        html.swap_ref(two.clone());

        let resolved = page.get_element(&html).unwrap();
        assert_eq!(resolved.id, two.id);
    }

    #[test]
    fn test_resolve_rejects_other_pages() {
        let here = Page::from_html(r#"<div id="a"></div>"#);
        let there = Page::from_html(r#"<span id="b"></span>"#);
        let node = there.query("#b").unwrap().unwrap();
        let wrapper = there.qs("#b").unwrap().unwrap();

        assert!(!here.owns(&node));
        assert!(!here.is_attached(&node));
        assert!(matches!(
            here.resolve(&node, Resolution::Advisory),
            Err(Error::WrongDocument { child }) if child == "span"
        ));
        assert!(matches!(
            here.get_element(&wrapper),
            Err(Error::WrongDocument { .. })
        ));
        assert!(here.from_target(&node).is_err());
        assert!(there.owns(&node));
    }

    #[test]
    fn test_scoped_queries_share_null_on_no_match() {
        let page = Page::from_html(r#"<ul id="l"><li>1</li><li>2</li></ul><li>3</li>"#);
        let list = page.query("#l").unwrap().unwrap();

        assert_eq!(page.qsa_in(&list, "li").unwrap().map(|v| v.len()), Some(2));
        assert_eq!(page.qsa("li").unwrap().map(|v| v.len()), Some(3));
        assert!(page.qsa_in(&list, "p").unwrap().is_none());
        assert!(page.qs_in(&list, "p").unwrap().is_none());
        assert_eq!(page.qs_in(&list, "li").unwrap().unwrap().get_text().as_ref(), "1");
        assert!(matches!(page.qsa_in(&list, "[["), Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn test_dispatch_without_listeners_completes() {
        let page = Page::from_html("<button>go</button>");
        let button = page.query("button").unwrap().unwrap();
        let event = page.dispatch(&button, "click");
        assert_eq!(event.event_type(), "click");
        assert_eq!(event.target(), button.id);
        assert_eq!(event.phase(), Phase::None);
        assert!(!event.propagation_stopped());
    }
}
