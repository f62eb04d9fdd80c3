//! # html-fluent
//!
//! A chainable wrapper for creating, locating, mutating and removing HTML
//! elements.
//!
//! A [`Page`] owns an element tree. An [`Html`] wraps one element of that tree
//! and exposes text, markup, attribute, class, inline-style, tree-insertion,
//! query and event-listener operations, each returning the wrapper so calls
//! can be chained.
//!
//! ## Quick Start
//!
//! ```rust
//! use html_fluent::{listener, Html, Page};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let page = Page::from_html(r#"<ul id="todo"></ul>"#);
//!
//! let list = page.qs("#todo")?.expect("list exists");
//! list.append("li")?.text("write tests").class_on(["pending"]);
//! list.append("li")?.text("ship it");
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&clicks);
//! let on_click = listener(move |_| counter.set(counter.get() + 1));
//! list.on("click", &on_click);
//!
//! for item in list.qsa("li")?.unwrap_or_default() {
//!     item.dispatch("click");
//! }
//! assert_eq!(clicks.get(), 2);
//! # Ok::<(), html_fluent::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Element-like inputs**: methods accept a `NodeRef`, another wrapper, or a
//!   selector string, resolved through one [`ElementRef`] variant
//! - **Strict and advisory resolution**: definite targets fail with
//!   [`Error::InvalidReference`], advisory ones skip quietly ([`Resolution`])
//! - **Null-on-no-match queries**: `qs`/`qsa` return `None` when nothing matches
//! - **Listener identity**: `un` detaches only the exact [`Listener`] passed to `on`

mod error;
mod html;
mod options;
mod page;
mod resolve;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Event listeners and synthetic dispatch.
pub mod events;

/// Inline style parsing and key-case translation.
pub mod style;

// Public API - re-exports
pub use error::{Error, Result};
pub use events::{listener, Event, Listener, Phase};
pub use html::Html;
pub use options::{BatchPrepend, Options};
pub use page::Page;
pub use resolve::{Child, ElementRef, Resolution};
