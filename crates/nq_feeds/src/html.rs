use nq_core::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Where article bodies usually live, most specific first.
pub const CONTENT_SELECTORS: [&str; 5] = ["article", ".article-content", ".post-content", "main", "body"];

const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", selector, e)))
}

/// Text of an element, skipping anything inside `<script>` or `<style>`.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

/// Concatenated visible text of every element matching `selector`.
pub fn extract_text(document: &Html, selector: &str) -> Result<String> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).map(visible_text).collect())
}

/// Pulls the article body out of a page: the first selector in
/// [`CONTENT_SELECTORS`] with non-blank text wins. Returns `None` when the
/// page has no readable text at all.
pub fn extract_article_text(html: &str, max_chars: usize) -> Option<String> {
    let document = Html::parse_document(html);
    for selector in CONTENT_SELECTORS {
        let text = match extract_text(&document, selector) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };
        let text = text.trim();
        if !text.is_empty() {
            return Some(truncate_chars(text, max_chars).trim_end().to_string());
        }
    }
    None
}

/// Plain text of an HTML snippet, whitespace collapsed.
pub fn strip_tags(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let text = visible_text(document.root_element());
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
