//! Fenced code highlighting with syntect.

use crate::parser::code_block::find_fenced_blocks;
use crate::render::fragment_placeholder;
use std::sync::LazyLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Theme used for `"default"` and for unknown theme names.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Highlights code into self-contained HTML with inline styles.
#[derive(Debug, Clone)]
pub struct CodeHighlighter {
    theme_name: &'static str,
    theme: &'static Theme,
}

impl CodeHighlighter {
    /// Create a highlighter for a bundled syntect theme.
    pub fn new(theme_name: &str) -> Self {
        let requested = match theme_name.trim() {
            "" | "default" => DEFAULT_THEME,
            name => name,
        };

        match THEME_SET.themes.get_key_value(requested) {
            Some((name, theme)) => Self {
                theme_name: name.as_str(),
                theme,
            },
            None => {
                tracing::warn!(
                    theme = requested,
                    fallback = DEFAULT_THEME,
                    "unknown code theme, using fallback"
                );
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        Self {
            theme_name: DEFAULT_THEME,
            theme: &THEME_SET.themes[DEFAULT_THEME],
        }
    }

    /// Name of the theme actually in use.
    pub fn theme_name(&self) -> &str {
        self.theme_name
    }

    /// Pick a grammar for a block.
    ///
    /// A language tag is looked up by token; without one the first line of the
    /// code is used for detection. Either way the result falls back to plain
    /// text.
    pub fn resolve_syntax(&self, lang: Option<&str>, code: &str) -> &'static SyntaxReference {
        let found = match lang {
            Some(lang) => {
                let syntax = SYNTAX_SET.find_syntax_by_token(lang);
                if syntax.is_none() {
                    tracing::debug!(lang, "no grammar for language tag");
                }
                syntax
            }
            None => SYNTAX_SET.find_syntax_by_first_line(code.lines().next().unwrap_or("")),
        };
        found.unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }

    /// Highlight one block, wrapped in `<div class="code-block">`.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = self.resolve_syntax(lang, code);
        let inner = match highlighted_html_for_string(code, &SYNTAX_SET, syntax, self.theme) {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(syntax = %syntax.name, error = %err, "highlighting failed, emitting plain block");
                format!("<pre>\n{}</pre>\n", html_escape::encode_text(code))
            }
        };
        format!("<div class=\"code-block\">{inner}</div>")
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Replace every fenced block with a placeholder line and stash its markup.
///
/// The placeholder keeps the fence's indentation and is separated from
/// neighbouring text by blank lines so it renders as a paragraph of its own.
pub fn freeze_code_blocks(text: &str, highlighter: &CodeHighlighter, stash: &mut Vec<String>) -> String {
    let blocks = find_fenced_blocks(text);
    if blocks.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for block in &blocks {
        let before = &text[cursor..block.start];
        out.push_str(before);
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }

        let fence_line = &text[block.start..];
        let indent = &fence_line[..fence_line.len() - fence_line.trim_start_matches(' ').len()];
        out.push_str(indent);
        out.push_str(&fragment_placeholder(stash.len()));
        stash.push(highlighter.highlight(block.code, block.language()));

        // Blank line after, unless the next line is already blank
        let rest = &text[block.end..];
        let next_line = rest.strip_prefix('\n').map(|r| r.split('\n').next().unwrap_or(""));
        if next_line.is_some_and(|line| !line.trim().is_empty()) {
            out.push('\n');
        }

        cursor = block.end;
    }

    out.push_str(&text[cursor..]);
    out
}
