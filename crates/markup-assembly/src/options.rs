//! Assembly options and their defaults.

use std::fmt;

use indexmap::IndexMap;

/// Raw attributes in caller insertion order.
pub type RawAttributes = IndexMap<String, AttrValue>;

/// Rendered attribute tokens keyed by attribute name, in output order.
pub type RenderedAttributes = IndexMap<String, String>;

/// Rendering branch for an assembled element.
///
/// Unrecognized names parse to [`TagType::Standard`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum TagType {
    /// `<tag attrs>content</tag>`
    #[default]
    Standard,
    /// `<tag attrs />`
    SelfClosing,
    /// Open and close tags returned separately.
    Split,
    /// Nothing at all when the content is empty.
    EmptyIfNoContent,
    /// Content without the surrounding tag.
    ContentOnly,
}

impl TagType {
    /// Parse a tag type name.
    ///
    /// Accepts camelCase (`selfClosing`), kebab-case and `snake_case`
    /// spellings; anything else is [`TagType::Standard`].
    ///
    /// # Example
    ///
    /// ```
    /// use markup_assembly::TagType;
    ///
    /// assert_eq!(TagType::parse("selfClosing"), TagType::SelfClosing);
    /// assert_eq!(TagType::parse("empty-if-no-content"), TagType::EmptyIfNoContent);
    /// assert_eq!(TagType::parse("marquee"), TagType::Standard);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "selfclosing" => Self::SelfClosing,
            "split" => Self::Split,
            "emptyifnocontent" => Self::EmptyIfNoContent,
            "contentonly" => Self::ContentOnly,
            _ => Self::Standard,
        }
    }

    /// Canonical camelCase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SelfClosing => "selfClosing",
            Self::Split => "split",
            Self::EmptyIfNoContent => "emptyIfNoContent",
            Self::ContentOnly => "contentOnly",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TagType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<TagType> for String {
    fn from(tag_type: TagType) -> Self {
        tag_type.as_str().to_owned()
    }
}

/// Raw value of a single attribute.
///
/// # Example
///
/// ```
/// use markup_assembly::AttrValue;
///
/// assert_eq!(AttrValue::from(""), AttrValue::Empty);
/// assert_eq!(AttrValue::from("x"), AttrValue::Text("x".to_owned()));
/// assert_eq!(
///     AttrValue::from(vec!["a", "b"]),
///     AttrValue::Tokens(vec!["a".to_owned(), "b".to_owned()])
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum AttrValue {
    /// Rendered as a bare attribute name (`disabled`).
    #[default]
    Empty,
    /// Used as-is.
    Text(String),
    /// Joined with a single space.
    Tokens(Vec<String>),
}

impl AttrValue {
    /// Whether this value renders as a bare attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Tokens(_) => false,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_owned())
        }
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(tokens: Vec<&str>) -> Self {
        Self::Tokens(tokens.into_iter().map(str::to_owned).collect())
    }
}

/// Any value that is neither a string nor a list of strings reads as
/// [`AttrValue::Empty`].
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AttrValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Tokens(Vec<String>),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self::from(text),
            Raw::Tokens(tokens) => Self::Tokens(tokens),
            Raw::Other(_) => Self::Empty,
        })
    }
}

/// Unrecognized option keys. Scalars are kept as text; nested values are
/// dropped.
#[cfg(feature = "serde")]
fn deserialize_extra<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Bool(bool),
        Int(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }

    let raw: IndexMap<String, Scalar> = serde::Deserialize::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Scalar::Text(text) => text,
                Scalar::Bool(flag) => flag.to_string(),
                Scalar::Int(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
                Scalar::Other(_) => return None,
            };
            Some((key, text))
        })
        .collect())
}

/// Fully resolved options for one assembly call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Options {
    /// Element name.
    pub tag: String,
    /// Rendering branch.
    pub tag_type: TagType,
    /// Inner content, inserted verbatim.
    pub content: String,
    /// Raw attributes in insertion order.
    pub attributes: RawAttributes,
    /// Character wrapped around attribute values.
    #[cfg_attr(feature = "serde", serde(rename = "attributeQuoteStyle"))]
    pub quote_style: char,
    /// Text emitted before the element.
    pub before: String,
    /// Text emitted after the element.
    pub after: String,
    /// Skip every hook for this call.
    pub suppress_hooks: bool,
    /// Unrecognized keys, kept for hooks but ignored by rendering.
    #[cfg_attr(
        feature = "serde",
        serde(flatten, deserialize_with = "deserialize_extra")
    )]
    pub extra: IndexMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag: "div".to_owned(),
            tag_type: TagType::Standard,
            content: String::new(),
            attributes: RawAttributes::new(),
            quote_style: '"',
            before: String::new(),
            after: String::new(),
            suppress_hooks: false,
            extra: IndexMap::new(),
        }
    }
}

/// Caller-supplied options; unset fields fall back to the defaults.
///
/// # Example
///
/// ```
/// use markup_assembly::{OptionOverrides, Options, TagType};
///
/// let options = OptionOverrides::new()
///     .with_tag("img")
///     .with_tag_type(TagType::SelfClosing)
///     .with_attribute("src", "x.png")
///     .merge_over(Options::default());
///
/// assert_eq!(options.tag, "img");
/// assert_eq!(options.quote_style, '"');
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct OptionOverrides {
    pub tag: Option<String>,
    pub tag_type: Option<TagType>,
    pub content: Option<String>,
    pub attributes: Option<RawAttributes>,
    #[cfg_attr(feature = "serde", serde(rename = "attributeQuoteStyle"))]
    pub quote_style: Option<char>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub suppress_hooks: Option<bool>,
    #[cfg_attr(
        feature = "serde",
        serde(flatten, deserialize_with = "deserialize_extra")
    )]
    pub extra: IndexMap<String, String>,
}

impl OptionOverrides {
    /// Create an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_tag_type(mut self, tag_type: TagType) -> Self {
        self.tag_type = Some(tag_type);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append one attribute, keeping insertion order.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes
            .get_or_insert_with(RawAttributes::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_quote_style(mut self, quote: char) -> Self {
        self.quote_style = Some(quote);
        self
    }

    #[must_use]
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    #[must_use]
    pub fn with_suppress_hooks(mut self, suppress: bool) -> Self {
        self.suppress_hooks = Some(suppress);
        self
    }

    /// Keep an unrecognized key for hooks to read.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Merge these overrides over `defaults`.
    ///
    /// Set fields win. Extra keys from both sides are kept, with the
    /// caller's value replacing a default under the same key.
    #[must_use]
    pub fn merge_over(self, defaults: Options) -> Options {
        let mut extra = defaults.extra;
        extra.extend(self.extra);

        Options {
            tag: self.tag.unwrap_or(defaults.tag),
            tag_type: self.tag_type.unwrap_or(defaults.tag_type),
            content: self.content.unwrap_or(defaults.content),
            attributes: self.attributes.unwrap_or(defaults.attributes),
            quote_style: self.quote_style.unwrap_or(defaults.quote_style),
            before: self.before.unwrap_or(defaults.before),
            after: self.after.unwrap_or(defaults.after),
            suppress_hooks: self.suppress_hooks.unwrap_or(defaults.suppress_hooks),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_type_parse_canonical() {
        for tag_type in [
            TagType::Standard,
            TagType::SelfClosing,
            TagType::Split,
            TagType::EmptyIfNoContent,
            TagType::ContentOnly,
        ] {
            assert_eq!(TagType::parse(tag_type.as_str()), tag_type);
        }
    }

    #[test]
    fn test_tag_type_parse_variants() {
        assert_eq!(TagType::parse("self_closing"), TagType::SelfClosing);
        assert_eq!(TagType::parse("CONTENT-ONLY"), TagType::ContentOnly);
        assert_eq!(TagType::parse(""), TagType::Standard);
        assert_eq!(TagType::parse("unknown"), TagType::Standard);
    }

    #[test]
    fn test_attr_value_from_empty_string() {
        assert_eq!(AttrValue::from(String::new()), AttrValue::Empty);
        assert!(AttrValue::Text(String::new()).is_empty());
        assert!(!AttrValue::Tokens(Vec::new()).is_empty());
    }

    #[test]
    fn test_empty_overrides_yield_defaults() {
        assert_eq!(OptionOverrides::new().merge_over(Options::default()), Options::default());
    }

    #[test]
    fn test_overrides_win() {
        let options = OptionOverrides::new()
            .with_tag("h2")
            .with_content("Title")
            .with_before("<header>")
            .with_suppress_hooks(true)
            .merge_over(Options::default());

        assert_eq!(options.tag, "h2");
        assert_eq!(options.content, "Title");
        assert_eq!(options.before, "<header>");
        assert_eq!(options.after, "");
        assert!(options.suppress_hooks);
        assert_eq!(options.tag_type, TagType::Standard);
    }

    #[test]
    fn test_custom_defaults_apply() {
        let defaults = Options {
            tag: "section".to_owned(),
            quote_style: '\'',
            ..Options::default()
        };
        let options = OptionOverrides::new().merge_over(defaults);
        assert_eq!(options.tag, "section");
        assert_eq!(options.quote_style, '\'');
    }

    #[test]
    fn test_extra_keys_pass_through() {
        let mut defaults = Options::default();
        defaults.extra.insert("theme".to_owned(), "light".to_owned());
        defaults.extra.insert("variant".to_owned(), "a".to_owned());

        let options = OptionOverrides::new()
            .with_extra("variant", "b")
            .with_extra("tracking", "off")
            .merge_over(defaults);

        let extra: Vec<_> = options
            .extra
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            extra,
            vec![("theme", "light"), ("variant", "b"), ("tracking", "off")]
        );
    }

    #[test]
    fn test_with_attribute_preserves_order() {
        let overrides = OptionOverrides::new()
            .with_attribute("id", "main")
            .with_attribute("class", "wide")
            .with_attribute("data-x", "1");
        let keys: Vec<_> = overrides.attributes.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["id", "class", "data-x"]);
    }
}
