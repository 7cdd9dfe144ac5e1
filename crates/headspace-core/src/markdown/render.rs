//! The rendering pipeline.
//!
//! Each step operates on the cumulative HTML string, in a fixed order:
//! comments are stripped, the whole input is escaped, then structural tags
//! are substituted back in. Malformed constructs never fail the render;
//! they fall through as literal escaped text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::escape::{decode_entities, escape_html};
use super::links::is_safe_url;
use super::options::RenderOptions;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)\r?\n(.*?)```").unwrap());
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^-{3,}\s*$").unwrap());
static UL_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.+)$").unwrap());
static OL_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\d+\. (.+)$").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

const UL_MARKER: &str = "<li data-list=\"ul\">";
const OL_MARKER: &str = "<li data-list=\"ol\">";

/// Renders a restricted markdown dialect to sanitized HTML.
///
/// The only nondeterminism is the pseudo-unique id generated for copy-button
/// targets when [`RenderOptions::copy_buttons`] is set; everything else is a
/// pure function of the input.
pub fn render(input: &str, options: &RenderOptions) -> String {
    let html = COMMENT_RE.replace_all(input, "").into_owned();
    let html = escape_html(&html);
    let html = replace_code_blocks(&html, options.copy_buttons);
    let html = INLINE_CODE_RE.replace_all(&html, "<code>$1</code>").into_owned();
    let html = replace_headers(&html, options.header_ids);
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>").into_owned();
    let html = ITALIC_RE.replace_all(&html, "<em>$1</em>").into_owned();
    let html = HR_RE.replace_all(&html, "<hr>").into_owned();
    let html = UL_ITEM_RE
        .replace_all(&html, format!("{UL_MARKER}$1</li>"))
        .into_owned();
    let html = OL_ITEM_RE
        .replace_all(&html, format!("{OL_MARKER}$1</li>"))
        .into_owned();
    let html = group_list_items(&html);
    let html = replace_links(&html, options);
    let html = replace_table_rows(&html);
    let html = group_table_rows(&html);
    wrap_paragraphs(&html)
}

fn replace_code_blocks(html: &str, copy_buttons: bool) -> String {
    FENCE_RE
        .replace_all(html, |caps: &Captures| {
            // Language tag (caps[1]) is captured but currently unused.
            let body = caps[2].trim_end_matches('\n');
            if copy_buttons {
                let id = format!("code-{:08x}", rand::random::<u32>());
                format!(
                    "<div class=\"code-block\">\
                     <button class=\"copy-btn\" data-target=\"{id}\">Copy</button>\
                     <pre id=\"{id}\"><code>{body}</code></pre></div>"
                )
            } else {
                format!("<pre><code>{body}</code></pre>")
            }
        })
        .into_owned()
}

fn replace_headers(html: &str, header_ids: bool) -> String {
    let mut out = html.to_string();
    for (re, level) in [(&H3_RE, 3), (&H2_RE, 2), (&H1_RE, 1)] {
        out = re
            .replace_all(&out, |caps: &Captures| {
                let text = &caps[1];
                if header_ids {
                    format!("<h{level} id=\"{}\">{text}</h{level}>", header_slug(text))
                } else {
                    format!("<h{level}>{text}</h{level}>")
                }
            })
            .into_owned();
    }
    out
}

/// Derives an anchor slug from escaped header text: decode entities,
/// lowercase, strip non-alphanumerics (keeping spaces and hyphens), then
/// collapse whitespace to single hyphens.
fn header_slug(text: &str) -> String {
    let decoded = decode_entities(text).to_lowercase();
    let kept: String = decoded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

fn group_list_items(html: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();
    let mut run_kind: Option<&str> = None;

    fn flush(out: &mut Vec<String>, run: &mut Vec<String>, kind: Option<&str>) {
        if run.is_empty() {
            return;
        }
        let tag = if kind == Some("ol") { "ol" } else { "ul" };
        out.push(format!("<{tag}>{}</{tag}>", run.join("")));
        run.clear();
    }

    for line in html.lines() {
        let kind = if line.starts_with(UL_MARKER) {
            Some("ul")
        } else if line.starts_with(OL_MARKER) {
            Some("ol")
        } else {
            None
        };

        match kind {
            Some(k) => {
                if run_kind != Some(k) {
                    flush(&mut out, &mut run, run_kind);
                    run_kind = Some(k);
                }
                let marker = if k == "ul" { UL_MARKER } else { OL_MARKER };
                run.push(line.replacen(marker, "<li>", 1));
            }
            None => {
                flush(&mut out, &mut run, run_kind);
                run_kind = None;
                out.push(line.to_string());
            }
        }
    }
    flush(&mut out, &mut run, run_kind);
    out.join("\n")
}

fn replace_links(html: &str, options: &RenderOptions) -> String {
    LINK_RE
        .replace_all(html, |caps: &Captures| {
            let text = &caps[1];
            let url = decode_entities(&caps[2]);

            if let Some(handler) = options.link_handler.as_ref() {
                if let Some(custom) = handler(text, &url) {
                    return custom;
                }
            }

            if is_safe_url(&url) {
                format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{text}</a>",
                    escape_html(&url)
                )
            } else {
                text.to_string()
            }
        })
        .into_owned()
}

fn replace_table_rows(html: &str) -> String {
    html.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.len() < 2 || !trimmed.starts_with('|') || !trimmed.ends_with('|') {
                return line.to_string();
            }
            let inner = &trimmed[1..trimmed.len() - 1];
            let cells: String = inner
                .split('|')
                .map(|cell| {
                    let cell = cell.trim();
                    if is_separator_cell(cell) {
                        "<td></td>".to_string()
                    } else {
                        format!("<td>{cell}</td>")
                    }
                })
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':')
}

fn group_table_rows(html: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut rows: Vec<String> = Vec::new();

    fn flush(out: &mut Vec<String>, rows: &mut Vec<String>) {
        if rows.is_empty() {
            return;
        }
        out.push(format!("<table>{}</table>", rows.join("")));
        rows.clear();
    }

    for line in html.lines() {
        if line.starts_with("<tr>") {
            rows.push(line.to_string());
        } else {
            flush(&mut out, &mut rows);
            out.push(line.to_string());
        }
    }
    flush(&mut out, &mut rows);
    out.join("\n")
}

const BLOCK_PREFIXES: [&str; 10] = [
    "<h1", "<h2", "<h3", "<hr", "<ul", "<ol", "<pre", "<div", "<table", "<p",
];

fn wrap_paragraphs(html: &str) -> String {
    html.split("\n\n")
        .filter_map(|block| {
            let block = block.trim();
            if block.is_empty() {
                return None;
            }
            let is_block_level = BLOCK_PREFIXES
                .iter()
                .any(|prefix| block.starts_with(prefix));
            if is_block_level {
                Some(block.to_string())
            } else {
                Some(format!("<p>{block}</p>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
