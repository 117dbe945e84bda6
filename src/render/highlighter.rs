//! Syntax highlighting to HTML with configurable themes using syntect + two-face.
//!
//! Code is turned into inline-styled `<span>` markup whose text content is
//! exactly the input code. Highlighting never fails: unknown languages fall
//! back to first-line detection, then to plain text, and any syntect error
//! yields the escaped code unchanged.
//!
//! # Theme Support
//!
//! Built-in themes (from two-face):
//! - `base16-ocean-dark` - Ocean-inspired colors (default)
//! - `gruvbox-dark` / `gruvbox-light` - Warm retro groove colors
//! - `solarized-dark` / `solarized-light` - Precision colors
//! - `monokai` - Sublime Text classic
//! - And many more (see `VALID_THEMES`)

use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

use super::escape_html;

/// All valid theme names that can be used in configuration.
pub const VALID_THEMES: &[&str] = &[
    "ansi",
    "base16",
    "base16-256",
    "base16-eighties-dark",
    "base16-mocha-dark",
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-cold",
    "coldark-dark",
    "dark-neon",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "inspired-github",
    "leet",
    "monokai",
    "monokai-bright",
    "monokai-light",
    "monokai-origin",
    "nord",
    "one-half-dark",
    "one-half-light",
    "solarized-dark",
    "solarized-light",
    "sublime-snazzy",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

/// Default theme name.
pub const DEFAULT_THEME: &str = "base16-ocean-dark";

/// Lazy-loaded theme set containing all two-face themes.
static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

/// Syntax definitions, newline-terminated flavor for `LinesWithEndings`.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

/// Map a theme name string to the corresponding EmbeddedThemeName.
fn theme_name_to_embedded(name: &str) -> Option<EmbeddedThemeName> {
    match name {
        "ansi" => Some(EmbeddedThemeName::Ansi),
        "base16" => Some(EmbeddedThemeName::Base16),
        "base16-256" => Some(EmbeddedThemeName::Base16_256),
        "base16-eighties-dark" => Some(EmbeddedThemeName::Base16EightiesDark),
        "base16-mocha-dark" => Some(EmbeddedThemeName::Base16MochaDark),
        "base16-ocean-dark" => Some(EmbeddedThemeName::Base16OceanDark),
        "base16-ocean-light" => Some(EmbeddedThemeName::Base16OceanLight),
        "coldark-cold" => Some(EmbeddedThemeName::ColdarkCold),
        "coldark-dark" => Some(EmbeddedThemeName::ColdarkDark),
        "dark-neon" => Some(EmbeddedThemeName::DarkNeon),
        "dracula" => Some(EmbeddedThemeName::Dracula),
        "github" => Some(EmbeddedThemeName::Github),
        "gruvbox-dark" => Some(EmbeddedThemeName::GruvboxDark),
        "gruvbox-light" => Some(EmbeddedThemeName::GruvboxLight),
        "inspired-github" => Some(EmbeddedThemeName::InspiredGithub),
        "leet" => Some(EmbeddedThemeName::Leet),
        "monokai" | "monokai-extended" => Some(EmbeddedThemeName::MonokaiExtended),
        "monokai-bright" => Some(EmbeddedThemeName::MonokaiExtendedBright),
        "monokai-light" => Some(EmbeddedThemeName::MonokaiExtendedLight),
        "monokai-origin" => Some(EmbeddedThemeName::MonokaiExtendedOrigin),
        "nord" => Some(EmbeddedThemeName::Nord),
        "one-half-dark" => Some(EmbeddedThemeName::OneHalfDark),
        "one-half-light" => Some(EmbeddedThemeName::OneHalfLight),
        "solarized-dark" => Some(EmbeddedThemeName::SolarizedDark),
        "solarized-light" => Some(EmbeddedThemeName::SolarizedLight),
        "sublime-snazzy" => Some(EmbeddedThemeName::SublimeSnazzy),
        "two-dark" => Some(EmbeddedThemeName::TwoDark),
        "visual-studio-dark-plus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
        "zenburn" => Some(EmbeddedThemeName::Zenburn),
        _ => None,
    }
}

/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    theme_name_to_embedded(name).is_some()
}

/// Result of highlighting one code element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// Inner HTML for the code element.
    pub html: String,
    /// Language the highlighter settled on; `None` when it fell back to plain text.
    pub language: Option<String>,
}

/// Syntax highlighter with configurable theme.
#[derive(Clone, Copy)]
pub struct SyntaxHighlighter {
    theme: &'static Theme,
}

impl SyntaxHighlighter {
    /// Create a new highlighter with the specified theme.
    ///
    /// If the theme name is invalid, falls back to the default theme.
    pub fn new(theme_name: &str) -> Self {
        let embedded = theme_name_to_embedded(theme_name).unwrap_or_else(|| {
            warn!(theme = theme_name, "Unknown theme, using {}", DEFAULT_THEME);
            EmbeddedThemeName::Base16OceanDark
        });
        let themes: &'static EmbeddedLazyThemeSet = &THEME_SET;
        Self {
            theme: themes.get(embedded),
        }
    }

    /// Create a highlighter with the default theme.
    pub fn default_theme() -> Self {
        Self::new(DEFAULT_THEME)
    }

    /// Highlight `code` as HTML.
    ///
    /// # Arguments
    /// * `code` - The source code to highlight
    /// * `language` - Optional language hint (e.g., "rust", "python")
    ///
    /// Never fails. If highlighting breaks down midway the escaped code is
    /// returned with `language: None`.
    pub fn highlight_html(&self, code: &str, language: Option<&str>) -> HighlightedCode {
        let syntax = resolve_syntax(code, language);
        let plain = std::ptr::eq(syntax, SYNTAX_SET.find_syntax_plain_text());

        match self.highlight_with(code, syntax) {
            Ok(html) => HighlightedCode {
                html,
                language: (!plain).then(|| syntax.name.to_lowercase()),
            },
            Err(err) => {
                warn!(error = %err, syntax = %syntax.name, "Highlighting failed, emitting plain code");
                HighlightedCode {
                    html: escape_html(code),
                    language: None,
                }
            }
        }
    }

    fn highlight_with(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, self.theme);
        let mut html = String::with_capacity(code.len() * 2);

        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &SYNTAX_SET)?;
            html.push_str(&styled_line_to_highlighted_html(
                &regions,
                IncludeBackground::No,
            )?);
        }

        Ok(html)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Declared language, then first-line heuristics, then plain text.
fn resolve_syntax(code: &str, language: Option<&str>) -> &'static SyntaxReference {
    let set: &'static SyntaxSet = &SYNTAX_SET;
    language
        .filter(|lang| !lang.is_empty())
        .and_then(|lang| set.find_syntax_by_token(lang))
        .or_else(|| {
            code.lines()
                .next()
                .and_then(|first| set.find_syntax_by_first_line(first))
        })
        .unwrap_or_else(|| set.find_syntax_plain_text())
}
