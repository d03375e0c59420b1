//! The staged assembly pipeline.
//!
//! Stages run strictly forward, each offering its result to a named hook:
//!
//! 1. [`Assembler::resolve_args`]: `{name}_args`
//! 2. [`Assembler::normalize_attributes`]: `{name}_{attr}_value`,
//!    `{name}_classes`, `{name}_id`, `{name}_attributes`
//! 3. [`Assembler::resolve_content`]: `{name}_content`
//! 4. [`Assembler::render`]: `{name}_markup`

mod args;
mod attributes;
mod content;
mod render;

use std::fmt;

use markup_config::Config;

use crate::debug_log::DebugLog;
use crate::fragment::Fragment;
use crate::hooks::{HookDispatcher, HookShape, NoHooks};
use crate::options::{OptionOverrides, Options};

static NO_HOOKS: NoHooks = NoHooks;

/// Assembles HTML fragments through a [`HookDispatcher`].
///
/// # Example
///
/// ```
/// use markup_assembly::{Assembler, Fragment, HookRegistry, OptionOverrides};
///
/// let mut hooks = HookRegistry::new();
/// hooks.add_filter("section-title_content", |title: String| format!("§ {title}"));
///
/// let assembler = Assembler::new(&hooks);
/// let html = assembler.assemble(
///     "section-title",
///     OptionOverrides::new().with_tag("h2").with_content("Intro"),
/// );
/// assert_eq!(html, Fragment::from(r#"<h2 class="section-title">§ Intro</h2>"#));
/// ```
pub struct Assembler<'h> {
    hooks: &'h dyn HookDispatcher,
    defaults: Options,
    debug: DebugLog,
}

impl fmt::Debug for Assembler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembler")
            .field("defaults", &self.defaults)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Default for Assembler<'static> {
    fn default() -> Self {
        Self::new(&NO_HOOKS)
    }
}

impl<'h> Assembler<'h> {
    /// Create an assembler with the built-in defaults and no debug log.
    #[must_use]
    pub fn new(hooks: &'h dyn HookDispatcher) -> Self {
        Self {
            hooks,
            defaults: Options::default(),
            debug: DebugLog::disabled(),
        }
    }

    /// Create an assembler whose defaults and debug log come from `config`.
    #[must_use]
    pub fn from_config(hooks: &'h dyn HookDispatcher, config: &Config) -> Self {
        let defaults = Options {
            tag: config.defaults.tag.clone(),
            quote_style: config.defaults.quote_char(),
            suppress_hooks: config.defaults.suppress_hooks,
            ..Options::default()
        };
        Self {
            hooks,
            defaults,
            debug: DebugLog::from_config(&config.debug_resolved),
        }
    }

    /// Replace the defaults that caller options are merged over.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the debug log.
    #[must_use]
    pub fn with_debug_log(mut self, debug: DebugLog) -> Self {
        self.debug = debug;
        self
    }

    /// Defaults in effect.
    #[must_use]
    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// Run every stage for component `name`.
    #[must_use]
    pub fn assemble(&self, name: &str, overrides: OptionOverrides) -> Fragment {
        let options = self.resolve_args(name, overrides);
        let attributes = self.normalize_attributes(name, &options.attributes, &options);
        let content = self.resolve_content(name, &options);
        self.render(name, &options, &attributes, &content)
    }

    /// Offer `value` to the hook `hook` unless suppressed or unregistered.
    ///
    /// A result of a different shape is dropped in favour of the input.
    fn filter<T: HookShape>(&self, component: &str, hook: &str, value: T, suppress: bool) -> T {
        if suppress || !self.hooks.has_hook(hook) {
            return value;
        }

        tracing::debug!(component, hook, "Applying hook");
        self.debug.entry(component, "hook", hook);

        let original = value.clone();
        match T::from_hook_value(self.hooks.apply(hook, value.into_hook_value())) {
            Ok(result) => result,
            Err(other) => {
                tracing::warn!(
                    hook,
                    expected = T::KIND,
                    returned = other.kind(),
                    "Hook returned a different value shape, keeping original"
                );
                original
            }
        }
    }
}
