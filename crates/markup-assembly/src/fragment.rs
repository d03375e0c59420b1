//! Assembled output.

use std::fmt;

/// Output of one assembly call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Fragment {
    /// Complete markup.
    Markup(String),
    /// Open and close tags kept apart so the caller can place inner markup.
    Split(SplitMarkup),
}

impl Fragment {
    /// The empty fragment.
    #[must_use]
    pub fn empty() -> Self {
        Self::Markup(String::new())
    }

    /// Markup string, or `None` for a split fragment.
    #[must_use]
    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Self::Markup(markup) => Some(markup),
            Self::Split(_) => None,
        }
    }

    /// Split record, or `None` for flat markup.
    #[must_use]
    pub fn as_split(&self) -> Option<&SplitMarkup> {
        match self {
            Self::Markup(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    /// Whether the fragment renders to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Markup(markup) => markup.is_empty(),
            Self::Split(_) => false,
        }
    }

    /// Flatten into a string. A split fragment is joined with no inner markup.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Markup(markup) => markup,
            Self::Split(split) => split.wrap(""),
        }
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<String> for Fragment {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl From<&str> for Fragment {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_owned())
    }
}

impl From<SplitMarkup> for Fragment {
    fn from(split: SplitMarkup) -> Self {
        Self::Split(split)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markup(markup) => f.write_str(markup),
            Self::Split(split) => write!(f, "{}{}{}{}", split.before, split.open, split.close, split.after),
        }
    }
}

/// Element with its open and close tags kept apart.
///
/// # Example
///
/// ```
/// use markup_assembly::{OptionOverrides, TagType, assemble};
///
/// let fragment = assemble(
///     "card",
///     OptionOverrides::new().with_tag("section").with_tag_type(TagType::Split),
/// );
/// let split = fragment.as_split().unwrap();
/// assert_eq!(split.wrap("<p>inner</p>"), r#"<section class="card"><p>inner</p></section>"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitMarkup {
    pub before: String,
    pub open: String,
    pub close: String,
    pub after: String,
}

impl SplitMarkup {
    /// Assemble the final markup around `inner`.
    #[must_use]
    pub fn wrap(&self, inner: &str) -> String {
        let mut out = String::with_capacity(
            self.before.len() + self.open.len() + inner.len() + self.close.len() + self.after.len(),
        );
        out.push_str(&self.before);
        out.push_str(&self.open);
        out.push_str(inner);
        out.push_str(&self.close);
        out.push_str(&self.after);
        out
    }
}
