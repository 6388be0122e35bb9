//! HTML escaping and iframe embedding

/// Escape text for use in HTML content or a quoted attribute
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// True if `value` is safe to place in a CSS declaration or a quoted
/// attribute: colour names, hex, `rgb(...)`, lengths.
pub fn is_css_value(value: &str) -> bool {
    !value.trim().is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-'))
}

/// Wrap a standalone HTML document in an `<iframe srcdoc>` so it can be
/// inlined into another page.
pub fn embed_srcdoc(document: &str, height: &str) -> String {
    format!(
        r#"<iframe srcdoc="{}" width="100%" height="{}" frameborder="0"></iframe>"#,
        html_escape(document),
        html_escape(height)
    )
}
