//! Converts the model's plain-text answer into a small, escaped HTML fragment.
//!
//! The accepted dialect is line based: `#`, `##` and `###` headings, `* ` bullet
//! items, and paragraphs. Paragraphs additionally get markdown links, bare URLs
//! and email addresses turned into anchors (see [`inline`]).

mod inline;

pub use inline::link_inline;

const CONTAINER_OPEN: &str = r#"<div style="max-width: 1000px; padding: 15px; margin: 0 auto; display: flex; flex-direction: column;">"#;
const CONTAINER_CLOSE: &str = "</div>";

/// Longest prefix first: `"### x"` must never be read as a `#` heading.
const HEADINGS: [(&str, &str); 3] = [("### ", "h3"), ("## ", "h2"), ("# ", "h1")];

const BULLET: &str = "* ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Closed,
    Open,
}

/// Escape the five HTML-significant characters. `&` goes first so the
/// entities produced by the later replacements are left intact.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Render `text` as an HTML fragment wrapped in a single layout container.
///
/// Never fails: empty input gives a container holding one `<p></p>`.
pub fn format_html(text: &str) -> String {
    let mut html = String::with_capacity(CONTAINER_OPEN.len() + text.len() * 2);
    html.push_str(CONTAINER_OPEN);

    let mut list = ListState::Closed;

    for raw in text.split('\n') {
        // Unicode White_Space; control separators such as U+001C are kept.
        let line = raw.trim();

        if line.is_empty() {
            html.push_str("<p></p>");
            continue;
        }

        if let Some((tag, rest)) = heading(line) {
            html.push_str(&format!("<{tag}>{}</{tag}>", escape_html(rest)));
        } else if let Some(item) = line.strip_prefix(BULLET) {
            if list == ListState::Closed {
                html.push_str("<ul>");
                list = ListState::Open;
            }
            html.push_str(&format!("<li>{}</li>", escape_html(item)));
        } else {
            if list == ListState::Open {
                html.push_str("</ul>");
                list = ListState::Closed;
            }
            html.push_str(&format!("<p>{}</p>", link_inline(&escape_html(line))));
        }
    }

    if list == ListState::Open {
        html.push_str("</ul>");
    }

    html.push_str(CONTAINER_CLOSE);
    html
}

fn heading(line: &str) -> Option<(&'static str, &str)> {
    HEADINGS
        .iter()
        .find_map(|(prefix, tag)| line.strip_prefix(prefix).map(|rest| (*tag, rest)))
}
