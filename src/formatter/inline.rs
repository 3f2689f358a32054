use regex::{Captures, Regex};
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("markdown link pattern"));

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

type Anchor = fn(&Captures<'_>, &mut String);
type Rest = fn(&str, &mut String);

/// Turn markdown links, bare URLs and email addresses in an already escaped
/// line into anchors.
///
/// Patterns run in that priority order and each one only sees the text the
/// previous ones left untouched, so the URL inside `[label](url)` is never
/// wrapped a second time.
pub fn link_inline(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    substitute(escaped, &MARKDOWN_LINK, markdown_anchor, link_urls, &mut out);
    out
}

fn link_urls(text: &str, out: &mut String) {
    substitute(text, &BARE_URL, url_anchor, link_emails, out);
}

fn link_emails(text: &str, out: &mut String) {
    substitute(text, &EMAIL, mailto_anchor, |rest, out| out.push_str(rest), out);
}

fn substitute(text: &str, pattern: &Regex, anchor: Anchor, rest: Rest, out: &mut String) {
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        rest(&text[last..whole.start()], out);
        anchor(&caps, out);
        last = whole.end();
    }
    rest(&text[last..], out);
}

fn markdown_anchor(caps: &Captures<'_>, out: &mut String) {
    out.push_str(&format!(r#"<a href="{}">{}</a>"#, &caps[2], &caps[1]));
}

fn url_anchor(caps: &Captures<'_>, out: &mut String) {
    out.push_str(&format!(r#"<a href="{0}">{0}</a>"#, &caps[0]));
}

fn mailto_anchor(caps: &Captures<'_>, out: &mut String) {
    out.push_str(&format!(r#"<a href="mailto:{0}">{0}</a>"#, &caps[0]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(link_inline("Serves four &amp; costs $8"), "Serves four &amp; costs $8");
    }

    #[test]
    fn test_markdown_link() {
        assert_eq!(
            link_inline("[Click](http://x.com)"),
            r#"<a href="http://x.com">Click</a>"#
        );
    }

    #[test]
    fn test_markdown_link_url_label() {
        let html = link_inline("[https://a.io](https://a.io) then https://b.io");
        assert_eq!(
            html,
            r#"<a href="https://a.io">https://a.io</a> then <a href="https://b.io">https://b.io</a>"#
        );
        assert_eq!(html.matches("<a ").count(), 2);
    }

    #[test]
    fn test_bare_urls() {
        assert_eq!(
            link_inline("see http://x.com and https://y.org/path?q=1 now"),
            r#"see <a href="http://x.com">http://x.com</a> and <a href="https://y.org/path?q=1">https://y.org/path?q=1</a> now"#
        );
    }

    #[test]
    fn test_url_needs_scheme() {
        assert_eq!(link_inline("www.example.com ftp://x.com"), "www.example.com ftp://x.com");
    }

    #[test]
    fn test_email() {
        assert_eq!(
            link_inline("Reach me at a@b.com."),
            r#"Reach me at <a href="mailto:a@b.com">a@b.com</a>."#
        );
    }

    #[test]
    fn test_email_inside_url_left_alone() {
        assert_eq!(
            link_inline("https://x.com/u/a@b.com"),
            r#"<a href="https://x.com/u/a@b.com">https://x.com/u/a@b.com</a>"#
        );
    }

    #[test]
    fn test_email_inside_markdown_label_left_alone() {
        assert_eq!(
            link_inline("[a@b.com](https://x.com)"),
            r#"<a href="https://x.com">a@b.com</a>"#
        );
    }

    #[test]
    fn test_email_next_to_entities() {
        assert_eq!(
            link_inline("&lt;chef@kitchen.io&gt;"),
            r#"&lt;<a href="mailto:chef@kitchen.io">chef@kitchen.io</a>&gt;"#
        );
    }

    #[test]
    fn test_short_tld_not_email() {
        assert_eq!(link_inline("a@b.c"), "a@b.c");
    }

    #[test]
    fn test_near_match_still_substituted() {
        assert_eq!(
            link_inline("[x](not a url)"),
            r#"<a href="not a url">x</a>"#
        );
    }
}
