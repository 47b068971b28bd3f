use scraper::{Html, Node};

/// Reduces an HTML fragment to its text content.
///
/// `<br>` becomes a newline, every other tag and comment is dropped, and
/// character references are decoded by the HTML5 parser. Stray `<` and `>`
/// that do not open a tag stay in the text.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());

    for node in fragment.tree.root().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }

    text
}
