//! Markdown rendering pipeline.
//!
//! ```text
//! markdown --MarkdownRenderer--> html --extract--> Vec<Chunk>
//!                 |
//!          SyntaxHighlighter
//! ```
//!
//! Every stage is a pure function of its input; none of them can fail.

pub mod chunks;
pub mod highlighter;
pub mod markdown;

pub use chunks::extract;
pub use highlighter::{is_valid_theme, HighlightedCode, SyntaxHighlighter, DEFAULT_THEME};
pub use markdown::MarkdownRenderer;

/// Escape text for use in HTML element content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
