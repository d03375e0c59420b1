//! Argument resolution.

use super::Assembler;
use crate::options::{OptionOverrides, Options};

impl Assembler<'_> {
    /// Merge `overrides` over the defaults, then offer the result to
    /// `{name}_args`.
    ///
    /// The hook may change any field; its result is used without further
    /// checks.
    #[must_use]
    pub fn resolve_args(&self, name: &str, overrides: OptionOverrides) -> Options {
        let merged = overrides.merge_over(self.defaults.clone());
        let suppress = merged.suppress_hooks;
        self.filter(name, &format!("{name}_args"), merged, suppress)
    }
}
