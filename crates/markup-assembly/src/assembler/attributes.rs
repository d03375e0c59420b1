//! Attribute normalization.
//!
//! `class` and `id` get their own pipelines; every other attribute is
//! rendered from its raw value, with a per-attribute value hook.

use indexmap::IndexSet;

use super::Assembler;
use crate::options::{AttrValue, Options, RawAttributes, RenderedAttributes};
use crate::sanitize::{escape_attr_quoted, sanitize_html_class};

impl Assembler<'_> {
    /// Render `raw` into attribute tokens, keyed by attribute name.
    ///
    /// Insertion order is kept. A missing `class` is added last with the
    /// component name as its value. An `id` without a usable value is left
    /// out, as is a `class` with no tokens left. The finished collection is
    /// offered to `{name}_attributes`.
    #[must_use]
    pub fn normalize_attributes(
        &self,
        name: &str,
        raw: &RawAttributes,
        options: &Options,
    ) -> RenderedAttributes {
        let suppress = options.suppress_hooks;
        let quote = options.quote_style;

        let injected = (!raw.contains_key("class")).then(|| AttrValue::Text(name.to_owned()));
        let entries = raw
            .iter()
            .map(|(attr, value)| (attr.as_str(), value))
            .chain(injected.iter().map(|value| ("class", value)));

        let mut rendered = RenderedAttributes::with_capacity(raw.len() + 1);
        for (attr, value) in entries {
            let token = match attr {
                "class" => {
                    let classes = self.class_list(name, value, suppress);
                    (!classes.is_empty()).then(|| quoted("class", &classes, quote))
                }
                "id" => self
                    .id_value(name, value, suppress)
                    .map(|id| quoted("id", &id, quote)),
                _ => Some(self.plain_attribute(name, attr, value, quote, suppress)),
            };
            if let Some(token) = token {
                rendered.insert(attr.to_owned(), token);
            }
        }

        self.filter(name, &format!("{name}_attributes"), rendered, suppress)
    }

    /// Sanitized, space-joined class list.
    ///
    /// Text is split on commas; each token goes through the sanitizer before
    /// `{name}_classes` sees the list. Blank and repeated tokens are dropped
    /// afterwards.
    fn class_list(&self, name: &str, value: &AttrValue, suppress: bool) -> String {
        let sanitized: Vec<String> = match value {
            AttrValue::Empty => Vec::new(),
            AttrValue::Text(text) => text.split(',').map(sanitize_html_class).collect(),
            AttrValue::Tokens(tokens) => tokens.iter().map(|t| sanitize_html_class(t)).collect(),
        };

        let classes = self.filter(name, &format!("{name}_classes"), sanitized, suppress);

        let unique: IndexSet<String> = classes
            .into_iter()
            .filter(|class| !class.trim().is_empty())
            .collect();
        unique.into_iter().collect::<Vec<_>>().join(" ")
    }

    /// First whitespace-separated token of a text id, sanitized.
    ///
    /// `None` when the raw value isn't non-empty text, or when nothing is
    /// left after sanitizing and `{name}_id`.
    fn id_value(&self, name: &str, value: &AttrValue, suppress: bool) -> Option<String> {
        let AttrValue::Text(text) = value else {
            return None;
        };
        let first = text.split_whitespace().next()?;

        let id = self.filter(
            name,
            &format!("{name}_id"),
            Some(sanitize_html_class(first)),
            suppress,
        );
        id.filter(|id| !id.is_empty())
    }

    fn plain_attribute(
        &self,
        name: &str,
        attr: &str,
        value: &AttrValue,
        quote: char,
        suppress: bool,
    ) -> String {
        let joined = match value {
            AttrValue::Empty => return attr.to_owned(),
            AttrValue::Text(text) if text.is_empty() => return attr.to_owned(),
            AttrValue::Text(text) => text.clone(),
            AttrValue::Tokens(tokens) => tokens.join(" "),
        };

        let value = self.filter(name, &format!("{name}_{attr}_value"), joined, suppress);
        quoted(attr, &value, quote)
    }
}

fn quoted(attr: &str, value: &str, quote: char) -> String {
    format!("{attr}={quote}{}{quote}", escape_attr_quoted(value, quote))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use crate::hooks::HookRegistry;
    use crate::options::{AttrValue, OptionOverrides, Options, RawAttributes};
    use crate::Assembler;

    fn raw(pairs: &[(&str, AttrValue)]) -> RawAttributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn tokens(assembler: &Assembler<'_>, name: &str, attrs: &RawAttributes) -> Vec<String> {
        assembler
            .normalize_attributes(name, attrs, &Options::default())
            .into_values()
            .collect()
    }

    #[test]
    fn test_class_injected_from_component_name() {
        let attrs = tokens(&Assembler::default(), "section-title", &RawAttributes::new());
        assert_eq!(attrs, vec![r#"class="section-title""#]);
    }

    #[test]
    fn test_injected_class_goes_last() {
        let attrs = raw(&[("id", "main".into()), ("role", "banner".into())]);
        let attrs = tokens(&Assembler::default(), "hero", &attrs);
        assert_eq!(attrs, vec![r#"id="main""#, r#"role="banner""#, r#"class="hero""#]);
    }

    #[test]
    fn test_class_comma_split_sanitized() {
        let attrs = raw(&[("class", "a, b ,,c".into())]);
        assert_eq!(tokens(&Assembler::default(), "x", &attrs), vec![r#"class="a b c""#]);
    }

    #[test]
    fn test_class_list_deduplicated() {
        let attrs = raw(&[("class", vec!["btn", "btn", "", "btn-primary", "<b>"].into())]);
        assert_eq!(
            tokens(&Assembler::default(), "x", &attrs),
            vec![r#"class="btn btn-primary b""#]
        );
    }

    #[test]
    fn test_class_with_no_tokens_omitted() {
        let attrs = raw(&[("class", AttrValue::Empty), ("title", "t".into())]);
        assert_eq!(tokens(&Assembler::default(), "x", &attrs), vec![r#"title="t""#]);
    }

    #[test]
    fn test_id_first_token() {
        let attrs = raw(&[("id", "first second".into())]);
        let rendered =
            Assembler::default().normalize_attributes("x", &attrs, &Options::default());
        assert_eq!(rendered.get("id").map(String::as_str), Some(r#"id="first""#));
    }

    #[test]
    fn test_empty_id_omitted() {
        let attrs = raw(&[("id", AttrValue::Text(String::new()))]);
        let rendered =
            Assembler::default().normalize_attributes("x", &attrs, &Options::default());
        assert!(!rendered.contains_key("id"));
        assert_eq!(rendered.len(), 1);
    }

    #[test]
    fn test_unusable_ids_omitted() {
        for value in [
            AttrValue::Empty,
            AttrValue::Text("   ".to_owned()),
            AttrValue::Text("!!!".to_owned()),
            AttrValue::Tokens(vec!["a".to_owned()]),
        ] {
            let attrs = raw(&[("id", value.clone())]);
            let rendered =
                Assembler::default().normalize_attributes("x", &attrs, &Options::default());
            assert!(!rendered.contains_key("id"), "id rendered for {value:?}");
        }
    }

    #[test]
    fn test_id_sanitized() {
        let attrs = raw(&[("id", "  main<nav> extra".into())]);
        let rendered =
            Assembler::default().normalize_attributes("x", &attrs, &Options::default());
        assert_eq!(rendered["id"], r#"id="mainnav""#);
    }

    #[test]
    fn test_bare_attribute() {
        let attrs = raw(&[("disabled", AttrValue::Empty), ("hidden", "".into())]);
        assert_eq!(
            tokens(&Assembler::default(), "x", &attrs),
            vec!["disabled", "hidden", r#"class="x""#]
        );
    }

    #[test]
    fn test_list_value_joined_and_escaped() {
        let attrs = raw(&[
            ("rel", vec!["noopener", "noreferrer"].into()),
            ("title", r#"Say "hi" & go"#.into()),
        ]);
        assert_eq!(
            tokens(&Assembler::default(), "x", &attrs),
            vec![
                r#"rel="noopener noreferrer""#,
                r#"title="Say &quot;hi&quot; &amp; go""#,
                r#"class="x""#,
            ]
        );
    }

    #[test]
    fn test_single_quote_style() {
        let attrs = raw(&[("href", "/a".into())]);
        let options = Options {
            quote_style: '\'',
            ..Options::default()
        };
        let rendered: Vec<_> = Assembler::default()
            .normalize_attributes("link", &attrs, &options)
            .into_values()
            .collect();
        assert_eq!(rendered, vec!["href='/a'", "class='link'"]);
    }

    #[test]
    fn test_custom_quote_escaped_in_value() {
        let attrs = raw(&[("title", "a`b".into())]);
        let options = Options {
            quote_style: '`',
            ..Options::default()
        };
        let rendered: Vec<_> = Assembler::default()
            .normalize_attributes("x", &attrs, &options)
            .into_values()
            .collect();
        assert_eq!(rendered, vec!["title=`a&#96;b`", "class=`x`"]);
    }

    #[test]
    fn test_order_preserved() {
        let attrs = raw(&[
            ("id", "main".into()),
            ("class", "wide".into()),
            ("data-x", "1".into()),
        ]);
        assert_eq!(
            tokens(&Assembler::default(), "x", &attrs),
            vec![r#"id="main""#, r#"class="wide""#, r#"data-x="1""#]
        );
    }

    #[test]
    fn test_value_hook() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("link_href_value", |href: String| format!("https://example.com{href}"));

        let attrs = raw(&[("href", "/docs".into()), ("title", "/docs".into())]);
        let rendered: Vec<_> = tokens(&Assembler::new(&hooks), "link", &attrs);
        assert_eq!(
            rendered,
            vec![
                r#"href="https://example.com/docs""#,
                r#"title="/docs""#,
                r#"class="link""#,
            ]
        );
    }

    #[test]
    fn test_value_hook_not_run_for_bare_attribute() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("x_disabled_value", |_: String| "nope".to_owned());

        let attrs = raw(&[("disabled", AttrValue::Empty)]);
        assert_eq!(
            tokens(&Assembler::new(&hooks), "x", &attrs),
            vec!["disabled", r#"class="x""#]
        );
    }

    #[test]
    fn test_classes_hook() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("card_classes", |mut classes: Vec<String>| {
            classes.push("card--featured".to_owned());
            classes.push("card".to_owned());
            classes
        });

        assert_eq!(
            tokens(&Assembler::new(&hooks), "card", &RawAttributes::new()),
            vec![r#"class="card card--featured""#]
        );
    }

    #[test]
    fn test_id_hook_can_remove_id() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("card_id", |_: Option<String>| None);

        let attrs = raw(&[("id", "main".into())]);
        assert_eq!(
            tokens(&Assembler::new(&hooks), "card", &attrs),
            vec![r#"class="card""#]
        );
    }

    #[test]
    fn test_attributes_hook_reorders() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("card_attributes", |attrs: crate::RenderedAttributes| {
            attrs.into_iter().rev().collect()
        });

        let attrs = raw(&[("id", "main".into()), ("data-x", "1".into())]);
        assert_eq!(
            tokens(&Assembler::new(&hooks), "card", &attrs),
            vec![r#"class="card""#, r#"data-x="1""#, r#"id="main""#]
        );
    }

    #[test]
    fn test_hooks_suppressed() {
        let mut hooks = HookRegistry::new();
        hooks
            .add_filter("card_classes", |_: Vec<String>| vec!["hooked".to_owned()])
            .add_filter("card_attributes", |_: crate::RenderedAttributes| {
                crate::RenderedAttributes::new()
            });

        let options = OptionOverrides::new()
            .with_suppress_hooks(true)
            .merge_over(Options::default());
        let rendered: Vec<_> = Assembler::new(&hooks)
            .normalize_attributes("card", &RawAttributes::new(), &options)
            .into_values()
            .collect();
        assert_eq!(rendered, vec![r#"class="card""#]);
    }

    #[test]
    fn test_classes_hook_sees_sanitized_tokens() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        let recorder = Arc::clone(&seen);
        hooks.add_filter("card_classes", move |classes: Vec<String>| {
            recorder.lock().unwrap().push(classes.clone());
            classes
        });

        let attrs = raw(&[("class", "<a>, b".into())]);
        assert_eq!(
            tokens(&Assembler::new(&hooks), "card", &attrs),
            vec![r#"class="a b""#]
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![vec!["a".to_owned(), "b".to_owned()]]
        );
    }

    #[test]
    fn test_id_hook_sees_sanitized_first_token() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        let recorder = Arc::clone(&seen);
        hooks.add_filter("card_id", move |id: Option<String>| {
            recorder.lock().unwrap().push(id.clone());
            id
        });

        let attrs = raw(&[("id", "main<nav> x".into())]);
        let rendered = Assembler::new(&hooks).normalize_attributes("card", &attrs, &Options::default());
        assert_eq!(rendered["id"], r#"id="mainnav""#);
        assert_eq!(*seen.lock().unwrap(), vec![Some("mainnav".to_owned())]);
    }
}
