// src/parser/html.rs
// =============================================================================
// Extracts words and links from an HTML page.
//
// We use the `scraper` crate to parse HTML into a DOM and the `url` crate to
// resolve relative links against the page's own URL.
//
// Words:
// - Only text inside <body> counts; <script>, <style> and <noscript> are
//   skipped
// - Text is split on anything that isn't a letter or digit, then lowercased
// - Words fully matching an ignored-word pattern are dropped
//
// Links:
// - Every <a href> resolved to an absolute URL
// - Only http/https are kept
// - "#fragment" parts are removed so page.html#a and page.html#b are one page
// =============================================================================

use super::ParsedPage;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

// Elements whose text is not page content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Parses an HTML document fetched from `page_url`
pub fn parse_html(html: &str, page_url: &str, ignored_words: &[Regex]) -> ParsedPage {
    let document = Html::parse_document(html);
    ParsedPage {
        words: extract_words(&document, ignored_words),
        links: extract_links(&document, page_url),
    }
}

fn extract_words(document: &Html, ignored_words: &[Regex]) -> Vec<String> {
    // These selectors are constants and known to be valid
    let body_selector = Selector::parse("body").unwrap();
    let mut words = Vec::new();

    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let skipped = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| SKIPPED_ELEMENTS.contains(&parent.value().name()))
                .unwrap_or(false);
            if skipped {
                continue;
            }

            words.extend(
                text.split(|c: char| !c.is_alphanumeric())
                    .filter(|word| !word.is_empty())
                    .map(str::to_lowercase)
                    .filter(|word| !ignored_words.iter().any(|pattern| pattern.is_match(word))),
            );
        }
    }

    words
}

fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();
    let selector = Selector::parse("a[href]").unwrap();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            // Without a valid base we can't resolve relative links
            tracing::warn!(page_url, "invalid base URL, skipping its links");
            return links;
        }
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute http(s) URL without its
// fragment. Returns None for mailto:, javascript:, and unparseable hrefs.
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let mut url = base.join(href.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationLoader;

    fn links_of(html: &str, base_url: &str) -> Vec<String> {
        parse_html(html, base_url, &[]).links
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(links_of(html, "https://example.com"), vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        assert_eq!(links_of(html, "https://example.com/page"), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_skip_mailto_and_javascript() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">Click</a>
        "#;
        assert!(links_of(html, "https://example.com").is_empty());
    }

    #[test]
    fn test_fragment_is_stripped() {
        let html = r##"<a href="#top">Top</a><a href="/a#b">A</a>"##;
        assert_eq!(
            links_of(html, "https://example.com/page"),
            vec!["https://example.com/page", "https://example.com/a"]
        );
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        assert_eq!(links_of(html, "https://example.com/page/").len(), 3);
    }

    #[test]
    fn test_words_are_split_and_lowercased() {
        let html = "<html><body><h1>Hello, World!</h1><p>hello again-world 42</p></body></html>";
        let page = parse_html(html, "https://example.com", &[]);
        assert_eq!(page.words, vec!["hello", "world", "hello", "again", "world", "42"]);
    }

    #[test]
    fn test_script_and_style_text_is_ignored() {
        let html = r#"<body><script>var hidden = 1;</script><style>p { color: red }</style><p>shown</p></body>"#;
        let page = parse_html(html, "https://example.com", &[]);
        assert_eq!(page.words, vec!["shown"]);
    }

    #[test]
    fn test_head_text_is_ignored() {
        let html = "<html><head><title>Title</title></head><body>content</body></html>";
        let page = parse_html(html, "https://example.com", &[]);
        assert_eq!(page.words, vec!["content"]);
    }

    #[test]
    fn test_ignored_words_are_dropped() {
        let config = ConfigurationLoader::read(r#"{"ignoredWords": ["^.{1,3}$"]}"#.as_bytes()).unwrap();
        let ignored = config.ignored_word_patterns().unwrap();
        let page = parse_html("<body>the quick brown fox</body>", "https://example.com", &ignored);
        assert_eq!(page.words, vec!["quick", "brown"]);
    }

    #[test]
    fn test_invalid_base_url_yields_no_links() {
        assert!(links_of(r#"<a href="/docs">Docs</a>"#, "not a url").is_empty());
    }
}
