//! Minimal XML helpers for the SOAP login exchange.
//!
//! The login envelope is small and its response shape is fixed, so the
//! values are pulled out with plain string scanning over unprefixed tags
//! rather than a full XML parser.

/// Escape a value for embedding in XML element content.
pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Undo [`escape`] on extracted element content.
fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Extract the content of the first `<tag>...</tag>` element.
pub(crate) fn extract_element(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)?;
    Some(unescape(&xml[start..start + end]))
}
