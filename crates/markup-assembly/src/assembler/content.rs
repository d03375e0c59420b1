//! Content resolution.

use super::Assembler;
use crate::options::Options;

impl Assembler<'_> {
    /// Inner content for `name`, after `{name}_content`.
    #[must_use]
    pub fn resolve_content(&self, name: &str, options: &Options) -> String {
        self.filter(
            name,
            &format!("{name}_content"),
            options.content.clone(),
            options.suppress_hooks,
        )
    }
}
