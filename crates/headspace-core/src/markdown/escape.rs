//! HTML escaping primitives.

/// Escapes the five characters that carry meaning in HTML text or
/// attribute position.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [`escape_html`] for fragments that need the literal text back
/// (header slugs, link targets).
///
/// `&amp;` is decoded last so a literal `&amp;lt;` round-trips to `&lt;`
/// rather than collapsing twice.
pub fn decode_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
