//! Class token sanitizing and attribute value escaping.

use std::fmt::Write as _;

/// Reduce a string to a safe HTML class or id token.
///
/// Percent-encoded octets (`%20`, `%2F`, ...) are stripped first, then every
/// character outside `A-Z a-z 0-9 _ -` is removed.
///
/// # Examples
///
/// ```
/// use markup_assembly::sanitize_html_class;
///
/// assert_eq!(sanitize_html_class("btn-primary"), "btn-primary");
/// assert_eq!(sanitize_html_class("a b<c>"), "abc");
/// assert_eq!(sanitize_html_class("wide%20card"), "widecard");
/// ```
#[must_use]
pub fn sanitize_html_class(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut result = String::with_capacity(value.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            i += 3;
            continue;
        }
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            result.push(char::from(b));
        }
        i += 1;
    }

    result
}

/// Escape a string for use inside a quoted HTML attribute value.
///
/// # Examples
///
/// ```
/// use markup_assembly::escape_attr;
///
/// assert_eq!(escape_attr(r#"say "hi" & <go>"#), "say &quot;hi&quot; &amp; &lt;go&gt;");
/// ```
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_attr_quoted(value, '"')
}

/// Like [`escape_attr`], also escaping `quote` as a numeric reference.
pub(crate) fn escape_attr_quoted(value: &str, quote: char) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            c if c == quote => {
                let _ = write!(result, "&#{};", u32::from(c));
            }
            _ => result.push(c),
        }
    }
    result
}
