//! Chainable element wrapper.
//!
//! [`Html`] holds one element of a [`Page`] and exposes a fluent mutation and
//! query surface over it. Setters return `&Self` so calls chain; operations
//! that can fail return `Result<&Self>` and chain with `?`.
//!
//! ```rust
//! use html_fluent::{Html, Page};
//!
//! let page = Page::new();
//! let card = Html::new(&page, "div")?;
//! card.class_on(["card"])
//!     .attr([("data-id", Some("7"))])
//!     .style([("padding", Some("4px"))])
//!     .append_to("body")?;
//!
//! let title = card.append("h2")?;
//! title.text("Hello");
//!
//! assert_eq!(
//!     page.qs(".card h2")?.map(|h| h.get_text().to_string()),
//!     Some("Hello".to_string())
//! );
//! # Ok::<(), html_fluent::Error>(())
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::dom::{self, NodeRef, Selection, StrTendril};
use crate::error::{Error, Result};
use crate::events::{Event, Listener};
use crate::options::BatchPrepend;
use crate::page::Page;
use crate::resolve::{Child, ElementRef, Resolution};
use crate::style::{self, Declarations, KeyCase};

/// Form controls and how each one stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormControl {
    /// `input`, `button`: the `value` attribute.
    ValueAttr,
    /// `option`: the `value` attribute, falling back to its text.
    Option,
    /// `textarea`: its text content.
    TextArea,
    /// `select`: the value of its selected option.
    Select,
}

impl FormControl {
    fn of(node: &NodeRef) -> Option<Self> {
        match dom::tag_name(node)?.as_str() {
            "input" | "button" => Some(Self::ValueAttr),
            "option" => Some(Self::Option),
            "textarea" => Some(Self::TextArea),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

fn option_value(node: &NodeRef) -> String {
    dom::get_attribute(node, "value").unwrap_or_else(|| dom::text_content(node).trim().to_string())
}

fn options_of<'a>(select: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    Selection::from(select.clone()).select("option").nodes().to_vec()
}

/// A chainable reference to one element.
///
/// Cloning a wrapper yields a second reference to the same element; any number
/// of wrappers may address one element at once.
#[derive(Clone)]
pub struct Html<'a> {
    page: &'a Page,
    elm: NodeRef<'a>,
}

impl<'a> Html<'a> {
    // === Construction & Identity ===

    /// Create a new detached element. An empty tag uses the page's default tag.
    pub fn new(page: &'a Page, tag: &str) -> Result<Self> {
        let elm = page.create_element(tag)?;
        Ok(Self { page, elm })
    }

    /// Bind to an existing element. No copy is made.
    #[must_use]
    pub fn adopt(page: &'a Page, elm: NodeRef<'a>) -> Self {
        Self { page, elm }
    }

    /// The element currently referenced.
    #[must_use]
    pub fn elm(&self) -> &NodeRef<'a> {
        &self.elm
    }

    /// The page this wrapper belongs to.
    #[must_use]
    pub fn page(&self) -> &'a Page {
        self.page
    }

    /// Point this wrapper at another element.
    ///
    /// The previous element is left where it is. Combined with [`cleanup`]
    /// this gives "remove and swap":
    ///
    /// ```rust
    /// # use html_fluent::{Html, Page};
    /// # let page = Page::new();
    /// let mut panel = Html::new(&page, "div")?;
    /// panel.append_to("body")?;
    /// panel.cleanup();
    /// let replacement = Html::new(&page, "section")?;
    /// replacement.append_to("body")?;
    /// panel.swap_ref(replacement.elm().clone());
    /// assert_eq!(panel.tag_name(), "section");
    /// # Ok::<(), html_fluent::Error>(())
    /// ```
    ///
    /// [`cleanup`]: Html::cleanup
    pub fn swap_ref(&mut self, elm: NodeRef<'a>) -> &mut Self {
        trace!(from = ?self.elm.id, to = ?elm.id, "rebinding wrapper");
        self.elm = elm;
        self
    }

    /// Whether two wrappers address the same element.
    #[must_use]
    pub fn same_element(&self, other: &Html<'_>) -> bool {
        self.elm.id == other.elm.id
    }

    /// Set the `id` attribute.
    ///
    /// Fails with [`Error::DuplicateId`] if the element already has one.
    pub fn id(&self, value: &str) -> Result<&Self> {
        if let Some(existing) = self.get_id() {
            return Err(Error::DuplicateId {
                existing,
                requested: value.to_string(),
            });
        }
        dom::set_attribute(&self.elm, "id", value);
        Ok(self)
    }

    /// The `id` attribute, if set and non-empty.
    #[must_use]
    pub fn get_id(&self) -> Option<String> {
        dom::get_attribute(&self.elm, "id").filter(|id| !id.is_empty())
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag_name(&self) -> String {
        dom::tag_name(&self.elm).unwrap_or_default()
    }

    // === Content & Attributes ===

    /// Replace the element's children with text.
    pub fn text(&self, val: &str) -> &Self {
        dom::set_text(&self.elm, val);
        self
    }

    /// Replace the element's children with markup. The markup is not escaped.
    pub fn html(&self, val: &str) -> &Self {
        dom::set_inner_html(&self.elm, val);
        self
    }

    /// Set or remove attributes: `Some` sets, `None` removes.
    pub fn attr<I, K, V>(&self, map: I) -> &Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in map {
            match value {
                Some(v) => dom::set_attribute(&self.elm, key.as_ref(), v.as_ref()),
                None => dom::remove_attribute(&self.elm, key.as_ref()),
            }
        }
        self
    }

    /// Read one attribute.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<String> {
        dom::get_attribute(&self.elm, name)
    }

    /// Set the value of a form control.
    ///
    /// On elements that are not form controls this does nothing.
    pub fn val(&self, value: &str) -> &Self {
        match FormControl::of(&self.elm) {
            Some(FormControl::ValueAttr | FormControl::Option) => {
                dom::set_attribute(&self.elm, "value", value);
            }
            Some(FormControl::TextArea) => dom::set_text(&self.elm, value),
            Some(FormControl::Select) => {
                let mut matched = false;
                for option in options_of(&self.elm) {
                    if !matched && option_value(&option) == value {
                        dom::set_attribute(&option, "selected", "");
                        matched = true;
                    } else {
                        dom::remove_attribute(&option, "selected");
                    }
                }
            }
            None => debug!(tag = %self.tag_name(), "val() on a non-form element ignored"),
        }
        self
    }

    /// Value of a form control, or `None` for other elements.
    #[must_use]
    pub fn get_value(&self) -> Option<String> {
        match FormControl::of(&self.elm)? {
            FormControl::ValueAttr => {
                Some(dom::get_attribute(&self.elm, "value").unwrap_or_default())
            }
            FormControl::Option => Some(option_value(&self.elm)),
            FormControl::TextArea => Some(dom::text_content(&self.elm).to_string()),
            FormControl::Select => {
                let options = options_of(&self.elm);
                let selected = options
                    .iter()
                    .find(|o| dom::has_attribute(o, "selected"))
                    .or_else(|| options.first());
                Some(selected.map(option_value).unwrap_or_default())
            }
        }
    }

    /// Text content at call time.
    #[must_use]
    pub fn get_text(&self) -> StrTendril {
        dom::text_content(&self.elm)
    }

    /// Inner markup at call time.
    #[must_use]
    pub fn get_html(&self) -> StrTendril {
        dom::inner_html(&self.elm)
    }

    /// Markup of the element itself, including its tag.
    #[must_use]
    pub fn outer_html(&self) -> StrTendril {
        dom::outer_html(&self.elm)
    }

    // === Classes & Style ===

    /// Toggle each class independently.
    pub fn class<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            dom::toggle_class(&self.elm, name.as_ref());
        }
        self
    }

    /// Add each class if missing.
    pub fn class_on<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            dom::add_class(&self.elm, name.as_ref());
        }
        self
    }

    /// Remove each class if present.
    pub fn class_off<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            dom::remove_class(&self.elm, name.as_ref());
        }
        self
    }

    /// Whether the element has a class.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        dom::has_class(&self.elm, name)
    }

    /// Set inline style with dashed property names (`background-color`).
    /// `None` clears a property.
    pub fn style<I, K, V>(&self, map: I) -> &Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        style::apply(&self.elm, KeyCase::Dashed, map);
        self
    }

    /// Set inline style with camelCase property names (`backgroundColor`).
    /// `None` clears a property.
    pub fn style_js<I, K, V>(&self, map: I) -> &Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        style::apply(&self.elm, KeyCase::Camel, map);
        self
    }

    /// One inline style property, by dashed name.
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<String> {
        Declarations::of(&self.elm)
            .get(&property.to_ascii_lowercase())
            .map(str::to_string)
    }

    // === Tree Mutation ===

    /// Insert this element as the last child of `parent`.
    ///
    /// Fails if `parent` does not resolve to an element.
    pub fn append_to<'r>(&self, parent: impl Into<ElementRef<'a, 'r>>) -> Result<&Self>
    where
        'a: 'r,
    {
        self.append_to_with(parent, Resolution::Strict)
    }

    /// Insert this element as the last child of `parent`, choosing what happens
    /// when `parent` names nothing.
    pub fn append_to_with<'r>(
        &self,
        parent: impl Into<ElementRef<'a, 'r>>,
        resolution: Resolution,
    ) -> Result<&Self>
    where
        'a: 'r,
    {
        if let Some(p) = self.page.resolve(parent, resolution)? {
            dom::append_child(&p, &self.elm)?;
        }
        Ok(self)
    }

    /// Insert this element as the first child of `parent`.
    ///
    /// Fails if `parent` does not resolve to an element.
    pub fn prepend_to<'r>(&self, parent: impl Into<ElementRef<'a, 'r>>) -> Result<&Self>
    where
        'a: 'r,
    {
        self.prepend_to_with(parent, Resolution::Strict)
    }

    /// Insert this element as the first child of `parent`, choosing what happens
    /// when `parent` names nothing.
    pub fn prepend_to_with<'r>(
        &self,
        parent: impl Into<ElementRef<'a, 'r>>,
        resolution: Resolution,
    ) -> Result<&Self>
    where
        'a: 'r,
    {
        if let Some(p) = self.page.resolve(parent, resolution)? {
            dom::prepend_child(&p, &self.elm)?;
        }
        Ok(self)
    }

    /// Append a child.
    ///
    /// A tag name creates a new element, appends it and returns a wrapper for
    /// the *new* element. An existing element is moved here and `self` is
    /// returned.
    pub fn append<'r>(&self, child: impl Into<Child<'a, 'r>>) -> Result<Html<'a>>
    where
        'a: 'r,
    {
        self.insert(child.into(), dom::append_child)
    }

    /// Prepend a child. Same return rule as [`append`](Html::append).
    pub fn prepend<'r>(&self, child: impl Into<Child<'a, 'r>>) -> Result<Html<'a>>
    where
        'a: 'r,
    {
        self.insert(child.into(), dom::prepend_child)
    }

    fn insert(
        &self,
        child: Child<'a, '_>,
        place: fn(&NodeRef, &NodeRef) -> Result<()>,
    ) -> Result<Html<'a>> {
        match child {
            Child::Tag(tag) => {
                let created = self.page.create_element(tag)?;
                place(&self.elm, &created)?;
                Ok(Html::adopt(self.page, created))
            }
            Child::Existing(target) => {
                let node = self.page.get_element(target)?;
                place(&self.elm, &node)?;
                Ok(self.clone())
            }
        }
    }

    /// Append each item in order. Children end up in argument order.
    pub fn append_many<'r, I>(&self, items: I) -> Result<&Self>
    where
        'a: 'r,
        I: IntoIterator,
        I::Item: Into<Child<'a, 'r>>,
    {
        for item in items {
            self.append(item)?;
        }
        Ok(self)
    }

    /// Prepend each item.
    ///
    /// With the default [`BatchPrepend::Reverse`] each item is prepended in
    /// turn, so `[a, b, c]` ends up as `c, b, a`. With
    /// [`BatchPrepend::Preserve`] the items keep argument order.
    pub fn prepend_many<'r, I>(&self, items: I) -> Result<&Self>
    where
        'a: 'r,
        I: IntoIterator,
        I::Item: Into<Child<'a, 'r>>,
    {
        let items: Vec<Child<'a, 'r>> = items.into_iter().map(Into::into).collect();
        match self.page.options().batch_prepend {
            BatchPrepend::Reverse => {
                for item in items {
                    self.prepend(item)?;
                }
            }
            BatchPrepend::Preserve => {
                for item in items.into_iter().rev() {
                    self.prepend(item)?;
                }
            }
        }
        Ok(self)
    }

    /// Remove all children, keeping the element in place.
    pub fn clear(&self) -> &Self {
        dom::set_inner_html(&self.elm, "");
        self
    }

    /// Detach the element from its parent.
    ///
    /// The wrapper keeps addressing the detached element until rebound.
    /// Listeners attached with [`on`](Html::on) stay registered.
    pub fn cleanup(&self) -> &Self {
        trace!(node = ?self.elm.id, "detaching element");
        dom::remove(&self.elm);
        self
    }

    /// Parent element, wrapped.
    #[must_use]
    pub fn parent(&self) -> Option<Html<'a>> {
        dom::parent_element(&self.elm).map(|p| Html::adopt(self.page, p))
    }

    /// Element children, wrapped, in order.
    #[must_use]
    pub fn children(&self) -> Vec<Html<'a>> {
        dom::element_children(&self.elm)
            .into_iter()
            .map(|c| Html::adopt(self.page, c))
            .collect()
    }

    /// Whether the element is reachable from the document.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.page.is_attached(&self.elm)
    }

    // === Queries ===

    /// First descendant matching `selector`, unwrapped.
    pub fn query(&self, selector: &str) -> Result<Option<NodeRef<'a>>> {
        let matcher = dom::compile_selector(selector)?;
        Ok(dom::query_selector(&self.elm, &matcher))
    }

    /// First descendant matching `selector`, wrapped.
    ///
    /// Fails with [`Error::InvalidReference`] when nothing matches.
    pub fn query_html(&self, selector: &str) -> Result<Html<'a>> {
        self.qs(selector)?.ok_or_else(|| {
            Error::InvalidReference(format!("no descendant matches {selector:?}"))
        })
    }

    /// First descendant matching `selector`, wrapped. `None` when nothing
    /// matches.
    pub fn qs(&self, selector: &str) -> Result<Option<Html<'a>>> {
        self.page.qs_in(&self.elm, selector)
    }

    /// Every descendant matching `selector`, wrapped, in document order.
    /// `None` (not an empty vector) when nothing matches.
    pub fn qsa(&self, selector: &str) -> Result<Option<Vec<Html<'a>>>> {
        self.page.qsa_in(&self.elm, selector)
    }

    // === Events ===

    /// Attach a listener.
    pub fn on(&self, event: &str, listener: &Listener) -> &Self {
        self.page.add_listener(&self.elm, event, listener);
        self
    }

    /// Detach a listener. Only the same `Listener` value used with
    /// [`on`](Html::on) is removed.
    pub fn un(&self, event: &str, listener: &Listener) -> &Self {
        self.page.remove_listener(&self.elm, event, listener);
        self
    }

    /// Dispatch a synthetic event at this element.
    pub fn dispatch(&self, event: &str) -> Event {
        self.page.dispatch(&self.elm, event)
    }
}

impl fmt::Debug for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Html")
            .field("tag", &self.tag_name())
            .field("node", &self.elm.id)
            .finish()
    }
}
