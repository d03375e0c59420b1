//! Fragment rendering.

use super::Assembler;
use crate::fragment::{Fragment, SplitMarkup};
use crate::options::{Options, RenderedAttributes, TagType};

impl Assembler<'_> {
    /// Combine tag, attributes and content into a fragment for the tag type,
    /// then offer it to `{name}_markup`.
    ///
    /// Split fragments reach the hook as [`Fragment::Split`].
    ///
    /// # Example
    ///
    /// ```
    /// use markup_assembly::{Assembler, Fragment, Options, RenderedAttributes, TagType};
    ///
    /// let options = Options {
    ///     tag: "img".to_owned(),
    ///     tag_type: TagType::SelfClosing,
    ///     ..Options::default()
    /// };
    /// let mut attrs = RenderedAttributes::new();
    /// attrs.insert("src".to_owned(), r#"src="x.png""#.to_owned());
    ///
    /// let html = Assembler::default().render("img-tag", &options, &attrs, "");
    /// assert_eq!(html, Fragment::from(r#"<img src="x.png" />"#));
    /// ```
    #[must_use]
    pub fn render(
        &self,
        name: &str,
        options: &Options,
        attributes: &RenderedAttributes,
        content: &str,
    ) -> Fragment {
        let fragment = match options.tag_type {
            TagType::Standard => Fragment::Markup(standard(options, attributes, content)),
            TagType::SelfClosing => Fragment::Markup(self_closing(options, attributes)),
            TagType::Split => Fragment::Split(split(options, attributes)),
            TagType::EmptyIfNoContent if content.is_empty() => Fragment::empty(),
            TagType::EmptyIfNoContent => Fragment::Markup(standard(options, attributes, content)),
            TagType::ContentOnly => {
                Fragment::Markup(format!("{}{content}{}", options.before, options.after))
            }
        };

        self.filter(
            name,
            &format!("{name}_markup"),
            fragment,
            options.suppress_hooks,
        )
    }
}

fn joined(attributes: &RenderedAttributes) -> String {
    attributes
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn open_tag(tag: &str, attributes: &RenderedAttributes) -> String {
    if attributes.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} {}>", joined(attributes))
    }
}

fn close_tag(tag: &str) -> String {
    format!("</{tag}>")
}

fn standard(options: &Options, attributes: &RenderedAttributes, content: &str) -> String {
    format!(
        "{}{}{content}{}{}",
        options.before,
        open_tag(&options.tag, attributes),
        close_tag(&options.tag),
        options.after
    )
}

fn self_closing(options: &Options, attributes: &RenderedAttributes) -> String {
    let tag = &options.tag;
    if attributes.is_empty() {
        format!("{}<{tag} />{}", options.before, options.after)
    } else {
        format!(
            "{}<{tag} {} />{}",
            options.before,
            joined(attributes),
            options.after
        )
    }
}

fn split(options: &Options, attributes: &RenderedAttributes) -> SplitMarkup {
    SplitMarkup {
        before: options.before.clone(),
        open: open_tag(&options.tag, attributes),
        close: close_tag(&options.tag),
        after: options.after.clone(),
    }
}
