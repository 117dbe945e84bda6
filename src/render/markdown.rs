//! Markdown to HTML with optional syntax highlighting.
//!
//! Conversion is delegated to pulldown-cmark. Highlighting is applied on the
//! event stream rather than on a re-parsed DOM: code blocks are buffered and
//! replaced by a single raw-HTML event, and inline code spans whose parent is
//! a paragraph are replaced by inline HTML. Nothing else in the stream is
//! touched.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

use super::{escape_html, SyntaxHighlighter};

/// Renders message bodies.
#[derive(Clone, Copy)]
pub struct MarkdownRenderer {
    highlighter: SyntaxHighlighter,
    options: Options,
}

/// A fenced or indented block collected between its start and end events.
struct OpenCodeBlock {
    language: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a renderer that highlights with `highlighter`.
    pub fn new(highlighter: SyntaxHighlighter) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self {
            highlighter,
            options,
        }
    }

    /// Render `markdown` to HTML without highlighting.
    ///
    /// Code blocks still carry their language classes.
    pub fn render(&self, markdown: &str) -> String {
        self.render_with(markdown, false)
    }

    /// Render `markdown` to HTML and highlight code.
    ///
    /// Highlighted are: every code block, and every inline code span that is a
    /// direct child of a paragraph. Highlighted elements get
    /// `data-highlighted="yes"`, plus `data-language` when a language was
    /// declared or detected.
    pub fn render_highlighted(&self, markdown: &str) -> String {
        self.render_with(markdown, true)
    }

    fn render_with(&self, markdown: &str, highlight: bool) -> String {
        let mut events: Vec<Event<'_>> = Vec::new();
        // One entry per open tag: whether it is a paragraph.
        let mut parents: Vec<bool> = Vec::new();
        let mut open_block: Option<OpenCodeBlock> = None;

        for event in Parser::new_ext(markdown, self.options) {
            if open_block.is_some() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(block) = open_block.take() {
                            events.push(Event::Html(self.code_block(block, highlight).into()));
                        }
                    }
                    Event::Text(text) => {
                        if let Some(block) = open_block.as_mut() {
                            block.code.push_str(&text);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    open_block = Some(OpenCodeBlock {
                        language: declared_language(&kind),
                        code: String::new(),
                    });
                }
                Event::Start(tag) => {
                    parents.push(matches!(tag, Tag::Paragraph));
                    events.push(Event::Start(tag));
                }
                Event::End(tag) => {
                    parents.pop();
                    events.push(Event::End(tag));
                }
                Event::Code(code) if highlight && parents.last() == Some(&true) => {
                    events.push(Event::InlineHtml(self.inline_code(&code).into()));
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        debug!(
            markdown_len = markdown.len(),
            html_len = out.len(),
            highlight,
            "Rendered markdown"
        );
        out
    }

    fn code_block(&self, block: OpenCodeBlock, highlight: bool) -> String {
        let code = block.code.trim_end_matches(['\n', '\r']);
        let language = block.language.as_deref();

        let mut attrs = String::new();
        if let Some(lang) = language {
            let lang = escape_html(lang);
            attrs.push_str(&format!(" class=\"{lang} language-{lang}\""));
        }

        let body = if highlight {
            let highlighted = self.highlighter.highlight_html(code, language);
            push_highlight_attrs(&mut attrs, highlighted.language.as_deref());
            highlighted.html
        } else {
            escape_html(code)
        };

        format!("<pre><code{attrs}>{body}</code></pre>\n")
    }

    fn inline_code(&self, code: &str) -> String {
        let highlighted = self.highlighter.highlight_html(code, None);
        let mut attrs = String::new();
        push_highlight_attrs(&mut attrs, highlighted.language.as_deref());
        format!("<code{attrs}>{}</code>", highlighted.html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(SyntaxHighlighter::default())
    }
}

fn push_highlight_attrs(attrs: &mut String, language: Option<&str>) {
    attrs.push_str(" data-highlighted=\"yes\"");
    if let Some(lang) = language {
        attrs.push_str(&format!(" data-language=\"{}\"", escape_html(lang)));
    }
}

/// First token of a fenced info string; indented blocks declare nothing.
fn declared_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::default()
    }

    #[test]
    fn plain_render_produces_commonmark_html() {
        let html = renderer().render("# Title\n\nSome *emphasis* and `code`.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<code>code</code>"));
        assert!(!html.contains("data-highlighted"));
    }

    #[test]
    fn plain_render_keeps_language_classes() {
        let html = renderer().render("```rust\nfn main() {}\n```");
        assert_eq!(
            html,
            "<pre><code class=\"rust language-rust\">fn main() {}</code></pre>\n"
        );
    }

    #[test]
    fn plain_render_escapes_code() {
        let html = renderer().render("```\na < b\n```");
        assert_eq!(html, "<pre><code>a &lt; b</code></pre>\n");
    }

    #[test]
    fn info_string_uses_first_token_only() {
        let html = renderer().render("```python title=\"x\"\npass\n```");
        assert!(html.starts_with("<pre><code class=\"python language-python\""));
    }

    #[test]
    fn highlighted_block_marks_code_element() {
        let html = renderer().render_highlighted("```rust\nlet x = 1;\n```");
        assert!(html.starts_with(
            "<pre><code class=\"rust language-rust\" data-highlighted=\"yes\" data-language=\"rust\">"
        ));
        assert!(html.contains("<span"));
        assert!(html.ends_with("</code></pre>\n"));
    }

    #[test]
    fn inline_code_in_paragraph_is_highlighted() {
        let html = renderer().render_highlighted("Hello `world`");
        assert!(html.starts_with("<p>Hello <code data-highlighted=\"yes\">"));
        assert!(html.contains("world"));
    }

    #[test]
    fn inline_code_outside_paragraph_is_left_alone() {
        let html = renderer().render_highlighted("# The `x` heading\n\n*emph `y`*");
        assert!(html.contains("<h1>The <code>x</code> heading</h1>"));
        assert!(html.contains("<em>emph <code>y</code></em>"));
    }

    #[test]
    fn indented_block_is_highlighted_without_class() {
        let html = renderer().render_highlighted("Intro\n\n    plain indented\n");
        assert!(html.contains("<pre><code data-highlighted=\"yes\">"));
        assert!(html.contains("plain indented"));
    }

    #[test]
    fn surrounding_structure_is_unchanged() {
        let md = "Before\n\n```rust\nfn f() {}\n```\n\n- one\n- two\n";
        let plain = renderer().render(md);
        let highlighted = renderer().render_highlighted(md);
        assert!(plain.starts_with("<p>Before</p>"));
        assert!(highlighted.starts_with("<p>Before</p>"));
        assert!(plain.ends_with("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"));
        assert!(highlighted.ends_with("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"));
    }

    #[test]
    fn empty_markdown_renders_empty() {
        assert_eq!(renderer().render_highlighted(""), "");
    }
}
