//! `![[embed]]` rewriting and image reference extraction.

use crate::parser::code_block::{find_code_block_ranges, is_in_code_block, replace_outside_code};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// ![[target]] or ![[target|size-or-alt]]
static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap()
});

/// File extensions that make an embed an image embed.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"];

/// Check whether an embed target names an image, by extension.
pub fn is_image_target(target: &str) -> bool {
    Path::new(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Parsed `|` suffix of an image embed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSize {
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// Set when the suffix was not numeric and is used as alt text instead.
    pub alt: Option<String>,
}

impl ImageSize {
    /// Interpret a size specifier.
    ///
    /// `300x200` sets both dimensions and `300` sets the width. A specifier
    /// whose width part is numeric but whose height is not is dropped
    /// silently. Anything else that is not a number becomes alt text.
    pub fn parse(specifier: &str) -> Self {
        if let Some((w, h)) = specifier.split_once('x') {
            if let Some(width) = parse_pixels(w) {
                return match parse_pixels(h) {
                    Some(height) => Self {
                        width: Some(width),
                        height: Some(height),
                        alt: None,
                    },
                    None => Self::default(),
                };
            }
        }

        match parse_pixels(specifier) {
            Some(width) => Self {
                width: Some(width),
                ..Self::default()
            },
            None => Self {
                alt: Some(specifier.to_string()),
                ..Self::default()
            },
        }
    }

    /// Inline CSS for the parsed dimensions, if any.
    pub fn style(&self) -> Option<String> {
        let parts: Vec<String> = [("width", self.width), ("height", self.height)]
            .into_iter()
            .filter_map(|(prop, value)| value.map(|v| format!("{prop}: {v}px")))
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// An optionally signed integer; values past `i64` saturate.
fn parse_pixels(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Build an `<img>` tag for an image embed.
pub fn render_image(target: &str, size_spec: Option<&str>, src: &str) -> String {
    let size = size_spec.map(ImageSize::parse).unwrap_or_default();
    let stem = Path::new(target)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(target);
    let alt = size.alt.as_deref().unwrap_or(stem);

    let style_attr = size
        .style()
        .map(|style| format!(" style=\"{style}\""))
        .unwrap_or_default();

    format!(
        "<img src=\"{}\" alt=\"{}\"{} />",
        html_escape::encode_double_quoted_attribute(src),
        html_escape::encode_double_quoted_attribute(alt),
        style_attr
    )
}

/// Placeholder for an embedded note; the note itself is not inlined.
pub fn render_note_placeholder(target: &str) -> String {
    format!(
        "<div class=\"embed-placeholder\" style=\"border: 1px dashed #ccc; padding: 8px 12px; margin: 8px 0; background-color: #f9f9f9; border-radius: 4px; font-style: italic; color: #666;\">Embedded note: {}</div>",
        html_escape::encode_text(target)
    )
}

/// Rewrite every embed outside code.
///
/// `resolve` maps an image reference to the path to emit; `None` (or no
/// resolver) leaves the raw reference in place for a later rewrite.
pub fn convert_embeds(content: &str, resolve: Option<&dyn Fn(&str) -> Option<String>>) -> String {
    replace_outside_code(content, &EMBED, |caps| {
        let target = caps[1].trim();
        let size_spec = caps.get(2).map(|m| m.as_str());

        if !is_image_target(target) {
            return render_note_placeholder(target);
        }

        let src = match resolve.and_then(|f| f(target)) {
            Some(resolved) => resolved,
            None => {
                if resolve.is_some() {
                    tracing::debug!(reference = target, "image reference left unresolved");
                }
                target.to_string()
            }
        };
        render_image(target, size_spec, &src)
    })
}

/// List image embed targets in source order. Note embeds are skipped.
pub fn extract_image_embeds(content: &str) -> Vec<String> {
    let code_ranges = find_code_block_ranges(content);
    EMBED
        .captures_iter(content)
        .filter(|cap| !is_in_code_block(cap.get(0).unwrap().start(), &code_ranges))
        .map(|cap| cap[1].trim().to_string())
        .filter(|target| is_image_target(target))
        .collect()
}
