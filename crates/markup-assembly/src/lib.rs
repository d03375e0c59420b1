//! Staged HTML fragment assembly with named hook points.
//!
//! A component is described declaratively (tag, attributes, content,
//! wrapping text) and assembled in four stages. Each stage offers its output
//! to a hook named after the component, so callers can rewrite any step
//! without touching the pipeline.
//!
//! # Architecture
//!
//! - [`Assembler::resolve_args`]: merges [`OptionOverrides`] over defaults
//! - [`Assembler::normalize_attributes`]: renders attribute tokens, with
//!   dedicated `class` and `id` handling
//! - [`Assembler::resolve_content`]: picks the inner content
//! - [`Assembler::render`]: builds the [`Fragment`] for the [`TagType`]
//!
//! Hooks are reached through the [`HookDispatcher`] trait. [`HookRegistry`]
//! holds typed filters; [`NoHooks`] disables them.
//!
//! # Example
//!
//! ```
//! use markup_assembly::{Fragment, OptionOverrides, assemble};
//!
//! let html = assemble(
//!     "section-title",
//!     OptionOverrides::new().with_tag("h2").with_content("A Section Title"),
//! );
//! assert_eq!(html, Fragment::from(r#"<h2 class="section-title">A Section Title</h2>"#));
//! ```

mod assembler;
mod debug_log;
mod fragment;
mod hooks;
mod options;
mod sanitize;

pub use assembler::Assembler;
pub use debug_log::{DebugLog, format_entry};
pub use fragment::{Fragment, SplitMarkup};
pub use hooks::{DEFAULT_PRIORITY, HookDispatcher, HookRegistry, HookShape, HookValue, NoHooks};
pub use options::{AttrValue, OptionOverrides, Options, RawAttributes, RenderedAttributes, TagType};
pub use sanitize::{escape_attr, sanitize_html_class};

/// Assemble component `name` with no hooks and the built-in defaults.
#[must_use]
pub fn assemble(name: &str, overrides: OptionOverrides) -> Fragment {
    Assembler::default().assemble(name, overrides)
}
