//! Named hook points and their dispatch.
//!
//! Every assembly stage offers its result to a hook named after the component,
//! e.g. `section-title_classes`. A [`HookDispatcher`] decides what runs there.
//! [`HookRegistry`] is the stock dispatcher; [`NoHooks`] passes everything
//! through untouched.

use std::collections::HashMap;
use std::fmt;

use crate::Fragment;
use crate::options::{Options, RenderedAttributes};

/// Value offered to a hook.
///
/// A dispatcher should hand back the same variant it was given. The assembler
/// discards results of any other shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookValue {
    /// Merged options (`{name}_args`).
    Args(Options),
    /// Attribute value or content (`{name}_{attr}_value`, `{name}_content`).
    Text(String),
    /// Sanitized class tokens (`{name}_classes`).
    Classes(Vec<String>),
    /// Sanitized id, if any (`{name}_id`).
    Id(Option<String>),
    /// Rendered attribute tokens (`{name}_attributes`).
    Attributes(RenderedAttributes),
    /// Final fragment (`{name}_markup`).
    Markup(Fragment),
}

impl HookValue {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Args(_) => "args",
            Self::Text(_) => "text",
            Self::Classes(_) => "classes",
            Self::Id(_) => "id",
            Self::Attributes(_) => "attributes",
            Self::Markup(_) => "markup",
        }
    }
}

/// Types that travel through a hook as one [`HookValue`] variant.
pub trait HookShape: Clone + Sized {
    /// Variant name as reported by [`HookValue::kind`].
    const KIND: &'static str;

    /// Wrap into a [`HookValue`].
    fn into_hook_value(self) -> HookValue;

    /// Unwrap, or give the value back if it holds another variant.
    ///
    /// # Errors
    ///
    /// Returns the original value when the variant doesn't match.
    fn from_hook_value(value: HookValue) -> Result<Self, HookValue>;
}

macro_rules! hook_shape {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl HookShape for $ty {
            const KIND: &'static str = $kind;

            fn into_hook_value(self) -> HookValue {
                HookValue::$variant(self)
            }

            fn from_hook_value(value: HookValue) -> Result<Self, HookValue> {
                match value {
                    HookValue::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

hook_shape!(Options, Args, "args");
hook_shape!(String, Text, "text");
hook_shape!(Vec<String>, Classes, "classes");
hook_shape!(Option<String>, Id, "id");
hook_shape!(RenderedAttributes, Attributes, "attributes");
hook_shape!(Fragment, Markup, "markup");

/// Dispatches values through named hooks.
///
/// # Example
///
/// ```
/// use markup_assembly::{HookDispatcher, HookValue};
///
/// struct Shout;
///
/// impl HookDispatcher for Shout {
///     fn has_hook(&self, name: &str) -> bool {
///         name.ends_with("_content")
///     }
///
///     fn apply(&self, _name: &str, value: HookValue) -> HookValue {
///         match value {
///             HookValue::Text(text) => HookValue::Text(text.to_uppercase()),
///             other => other,
///         }
///     }
/// }
/// ```
pub trait HookDispatcher {
    /// Whether anything is registered under `name`.
    ///
    /// The assembler skips [`apply`](Self::apply) when this is `false`.
    fn has_hook(&self, name: &str) -> bool;

    /// Run `value` through the hook named `name`.
    fn apply(&self, name: &str, value: HookValue) -> HookValue;
}

/// Dispatcher with no hooks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl HookDispatcher for NoHooks {
    fn has_hook(&self, _name: &str) -> bool {
        false
    }

    fn apply(&self, _name: &str, value: HookValue) -> HookValue {
        value
    }
}

/// Priority used by [`HookRegistry::add_filter`].
pub const DEFAULT_PRIORITY: i32 = 10;

type Filter = Box<dyn Fn(HookValue) -> HookValue + Send + Sync>;

struct Entry {
    priority: i32,
    filter: Filter,
}

/// Registry of filters keyed by hook name.
///
/// Filters under one name run in ascending priority, ties in registration
/// order, each receiving the previous filter's output.
///
/// # Example
///
/// ```
/// use markup_assembly::{Assembler, Fragment, HookRegistry, OptionOverrides};
///
/// let mut hooks = HookRegistry::new();
/// hooks.add_filter("notice_classes", |mut classes: Vec<String>| {
///     classes.push("is-dismissible".to_owned());
///     classes
/// });
///
/// let html = Assembler::new(&hooks).assemble("notice", OptionOverrides::new().with_content("Saved"));
/// assert_eq!(html, Fragment::from(r#"<div class="notice is-dismissible">Saved</div>"#));
/// ```
#[derive(Default)]
pub struct HookRegistry {
    filters: HashMap<String, Vec<Entry>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed filter at [`DEFAULT_PRIORITY`].
    ///
    /// The filter only sees values of its own shape; anything else passes
    /// through unchanged.
    pub fn add_filter<T, F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        T: HookShape + 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.add_filter_with_priority(name, DEFAULT_PRIORITY, filter)
    }

    /// Register a typed filter at `priority`. Lower runs first.
    pub fn add_filter_with_priority<T, F>(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        filter: F,
    ) -> &mut Self
    where
        T: HookShape + 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.add_raw_filter(name, priority, move |value| match T::from_hook_value(value) {
            Ok(inner) => filter(inner).into_hook_value(),
            Err(other) => other,
        })
    }

    /// Register an untyped filter that sees the [`HookValue`] itself.
    pub fn add_raw_filter<F>(&mut self, name: impl Into<String>, priority: i32, filter: F) -> &mut Self
    where
        F: Fn(HookValue) -> HookValue + Send + Sync + 'static,
    {
        let entries = self.filters.entry(name.into()).or_default();
        let pos = entries.partition_point(|e| e.priority <= priority);
        entries.insert(
            pos,
            Entry {
                priority,
                filter: Box::new(filter),
            },
        );
        self
    }

    /// Remove every filter under `name`. Returns whether any existed.
    pub fn remove_all(&mut self, name: &str) -> bool {
        self.filters.remove(name).is_some()
    }

    /// Number of filters registered under `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.filters.get(name).map_or(0, Vec::len)
    }
}

impl HookDispatcher for HookRegistry {
    fn has_hook(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    fn apply(&self, name: &str, value: HookValue) -> HookValue {
        match self.filters.get(name) {
            Some(entries) => entries.iter().fold(value, |acc, entry| (entry.filter)(acc)),
            None => value,
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.filters.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("filters", &names).finish()
    }
}
