//! Configuration options for a [`Page`](crate::Page).
//!
//! The `Options` struct controls the few behaviours that are a choice rather
//! than a platform rule: the fallback tag, batch-prepend ordering and listener
//! de-duplication.

/// Ordering used by [`Html::prepend_many`](crate::Html::prepend_many).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPrepend {
    /// Prepend each item in argument order, one at a time. The last item
    /// ends up first, so `prepend_many([a, b, c])` yields `[c, b, a]`.
    #[default]
    Reverse,

    /// Keep argument order: `prepend_many([a, b, c])` yields `[a, b, c]`
    /// ahead of any existing children.
    Preserve,
}

/// Configuration options for a page.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use html_fluent::{BatchPrepend, Options};
///
/// let options = Options {
///     batch_prepend: BatchPrepend::Preserve,
///     ..Options::default()
/// };
/// assert_eq!(options.default_tag, "div");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Tag used when an element is created from an empty tag name.
    ///
    /// Default: `"div"`
    pub default_tag: String,

    /// Ordering of batch prepends.
    ///
    /// Default: [`BatchPrepend::Reverse`]
    pub batch_prepend: BatchPrepend,

    /// Ignore a second registration of the same listener for the same event
    /// on the same element.
    ///
    /// Default: `true`
    pub dedupe_listeners: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_tag: "div".to_string(),
            batch_prepend: BatchPrepend::default(),
            dedupe_listeners: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.default_tag, "div");
        assert_eq!(options.batch_prepend, BatchPrepend::Reverse);
        assert!(options.dedupe_listeners);
    }

    #[test]
    fn test_struct_update_overrides_selected_fields_only() {
        let options = Options {
            default_tag: "section".to_string(),
            ..Options::default()
        };
        assert_eq!(options.default_tag, "section");
        assert_eq!(options.batch_prepend, BatchPrepend::Reverse);
    }
}
