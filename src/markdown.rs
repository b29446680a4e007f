use pulldown_cmark::{html, Parser};
use scraper::Html;

/// Strip markdown formatting from a comment body, keeping its text.
///
/// The body is rendered to HTML and the text nodes are concatenated, so the
/// whitespace between blocks survives. Leading and trailing whitespace is dropped.
/// Malformed markup never fails; it just comes through as literal text.
pub fn unmark(body: &str) -> String {
    let mut rendered = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut rendered, Parser::new(body));

    let fragment = Html::parse_fragment(&rendered);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}
