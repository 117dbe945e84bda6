//! Split rendered HTML into typed chunks.
//!
//! Parsing is html5ever's (via scraper), so malformed or partial markup is
//! recovered the way a browser would. Only the top-level children of `<body>`
//! are classified; anything nested stays inside its parent's fragment.

use scraper::{ElementRef, Html};

use crate::model::Chunk;

/// Decompose `html` into chunks, one per top-level element, in document order.
///
/// - `<pre>` whose first child is `<code>` becomes [`Chunk::CodeBlock`], with
///   the first class of `<code>` (or `""`) as language and its text content
///   as code.
/// - Every other element becomes [`Chunk::HtmlFragment`] with its outer HTML.
/// - Text and comment nodes have no outer markup and are skipped, as are
///   elements that serialize to nothing.
pub fn extract(html: &str) -> Vec<Chunk> {
    let document = Html::parse_document(html);
    let Some(body) = body_of(&document) else {
        return Vec::new();
    };

    body.children()
        .filter_map(ElementRef::wrap)
        .filter_map(classify)
        .collect()
}

fn body_of(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
}

fn classify(element: ElementRef<'_>) -> Option<Chunk> {
    if let Some(code) = leading_code(element) {
        return Some(Chunk::code(
            first_class(code),
            code.text().collect::<String>(),
        ));
    }

    let outer = element.html();
    (!outer.is_empty()).then(|| Chunk::html(outer))
}

/// The `<code>` child of a `<pre>`, if it is the very first child node.
fn leading_code(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() != "pre" {
        return None;
    }
    element
        .first_child()
        .and_then(ElementRef::wrap)
        .filter(|child| child.value().name() == "code")
}

fn first_class(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}
