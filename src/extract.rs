//! Text Extractor & Tokenizer: HTML in, an ordered token stream out.
//!
//! `extract` is the only public entry point. It gates on looking like
//! HTML at all, parses the DOM with `scraper`, builds the base token
//! stream, then re-walks the DOM for the structural boosts described in
//! the module-level doc below.
//!
//! Boost rule: a token earns +1 occurrence for every bold/strong element
//! it appears in, and +2 for every anchor/bold/strong/heading element —
//! so a token that is both bold and a heading gets +3 total. Boosts only
//! apply to tokens already present in the base stream; tag-only artifacts
//! that never appear as visible base text are ignored.

use scraper::{Html, Selector};

use crate::types::{MIN_TOKENS_PER_DOC, MIN_TOKEN_LENGTH};

const SET_B_SELECTOR: &str = "b, strong";
const SET_T_SELECTOR: &str = "a, b, strong, h1, h2, h3";

/// Extract the ordered (multiset) token stream from raw HTML, or `None` if
/// the document is rejected (non-HTML, or too short after boosting).
pub fn extract(html: &str) -> Option<Vec<String>> {
    if !html.to_lowercase().contains("</html>") {
        return None;
    }

    let document = Html::parse_document(html);
    let base = base_tokens(&document);
    if base.is_empty() {
        return None;
    }

    let mut base_set = std::collections::HashSet::with_capacity(base.len());
    base_set.extend(base.iter().cloned());

    let mut tokens = base;
    tokens.extend(boosted_tokens(&document, SET_B_SELECTOR, &base_set, 1));
    tokens.extend(boosted_tokens(&document, SET_T_SELECTOR, &base_set, 2));

    if tokens.len() < MIN_TOKENS_PER_DOC {
        return None;
    }
    Some(tokens)
}

fn base_tokens(document: &Html) -> Vec<String> {
    let text = visible_text(document);
    split_and_filter(&text)
}

fn boosted_tokens(
    document: &Html,
    selector: &str,
    base_set: &std::collections::HashSet<String>,
    repeats: usize,
) -> Vec<String> {
    let selector = Selector::parse(selector).expect("static selector is valid");
    let mut boosted = Vec::new();
    for element in document.select(&selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        for token in split_and_filter(&text) {
            if base_set.contains(&token) {
                for _ in 0..repeats {
                    boosted.push(token.clone());
                }
            }
        }
    }
    boosted
}

fn visible_text(document: &Html) -> String {
    let collapsed: String = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&collapsed)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on runs of non-alphanumeric characters, lowercase, drop anything
/// shorter than `MIN_TOKEN_LENGTH`.
fn split_and_filter(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .map(|tok| tok.to_lowercase())
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_LENGTH)
        .collect()
}

/// Tokenize a query string exactly as step 4 of extraction, with no HTML
/// gate and no structural boosts.
pub fn tokenize_query(text: &str) -> Vec<String> {
    split_and_filter(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_doc(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    fn padding_tokens(n: usize) -> String {
        (0..n).map(|i| format!("filler{} ", i)).collect()
    }

    #[test]
    fn rejects_non_html() {
        assert_eq!(extract("just some plain text, no tags here"), None);
    }

    #[test]
    fn rejects_too_short_documents() {
        let html = html_doc(&format!("<p>{}</p>", padding_tokens(10)));
        assert_eq!(extract(&html), None);
    }

    #[test]
    fn accepts_document_at_the_length_boundary() {
        let html = html_doc(&format!("<p>{}</p>", padding_tokens(MIN_TOKENS_PER_DOC)));
        assert!(extract(&html).is_some());
    }

    #[test]
    fn bold_token_gets_one_extra_occurrence() {
        // "rust" appears exactly once in the base stream (inside the <b>,
        // which is still ordinary document text); the bold boost adds one
        // more, for a total of two.
        let body = format!(
            "<p>{} <b>rust</b></p>",
            padding_tokens(MIN_TOKENS_PER_DOC - 1)
        );
        let html = html_doc(&body);
        let tokens = extract(&html).unwrap();
        let count = tokens.iter().filter(|t| t.as_str() == "rust").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn heading_token_gets_two_extra_occurrences() {
        // "rust" appears exactly once in the base stream (inside the
        // <h1>); the heading boost adds two more, for a total of three.
        let body = padding_tokens(MIN_TOKENS_PER_DOC - 1);
        let html = html_doc(&format!("<h1>rust</h1><p>{}</p>", body));
        let tokens = extract(&html).unwrap();
        let count = tokens.iter().filter(|t| t.as_str() == "rust").count();
        assert_eq!(count, 3);
    }

    #[test]
    fn bold_and_heading_boosts_are_independent() {
        let body = padding_tokens(MIN_TOKENS_PER_DOC - 2);
        let html = html_doc(&format!(
            "<h1>systems</h1><b>rust</b><p>{}</p>",
            body
        ));
        let tokens = extract(&html).unwrap();
        let rust = tokens.iter().filter(|t| t.as_str() == "rust").count();
        let systems = tokens.iter().filter(|t| t.as_str() == "systems").count();
        assert_eq!(rust, 2); // base + Set B (+1)
        assert_eq!(systems, 3); // base + Set T (+2)
    }

    #[test]
    fn short_tokens_are_dropped() {
        let tokens = tokenize_query("a an the rust programming");
        assert_eq!(tokens, vec!["an", "the", "rust", "programming"]);
    }

    #[test]
    fn tokenizer_lowercases_and_splits_on_punctuation() {
        let tokens = tokenize_query("Rust's Fast!!");
        assert_eq!(tokens, vec!["rust", "s", "fast"]);
    }
}
