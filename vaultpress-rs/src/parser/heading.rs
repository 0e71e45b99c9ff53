//! Heading lookup and slug generation.

use crate::parser::code_block::{find_code_block_ranges, is_line_in_fenced_code_block};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ATX-style heading: # Heading, ## Heading, etc.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap()
});

/// Return the text of the first heading at exactly `level`, skipping fenced code.
pub fn first_heading(content: &str, level: usize) -> Option<String> {
    let code_ranges = find_code_block_ranges(content);

    content.lines().enumerate().find_map(|(line_idx, line)| {
        if is_line_in_fenced_code_block(line_idx + 1, &code_ranges) {
            return None;
        }
        let cap = HEADING.captures(line)?;
        (cap[1].len() == level).then(|| cap[2].trim().to_string())
    })
}

/// Generate a URL-safe slug from heading text.
///
/// Follows Obsidian's algorithm:
/// - Normalize unicode
/// - Convert to lowercase
/// - Replace spaces with hyphens
/// - Remove special characters (keep alphanumeric, hyphens, underscores)
/// - Collapse multiple hyphens
pub fn slugify(text: &str) -> String {
    let normalized: String = text.nfc().collect();

    let mut slug = String::new();
    let mut last_was_hyphen = false;

    for c in normalized.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if c == '-' || c == '_' {
            if !last_was_hyphen && !slug.is_empty() {
                slug.push(c);
                last_was_hyphen = c == '-';
            }
        } else if c.is_whitespace() && !last_was_hyphen && !slug.is_empty() {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Hands out unique slugs for one document.
#[derive(Debug, Default)]
pub struct SlugCounter {
    used: HashSet<String>,
}

impl SlugCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text`, appending `_1`, `_2`, ... until the id is unused.
    pub fn unique(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let mut slug = base.clone();
        let mut n = 0;
        while self.used.contains(&slug) {
            n += 1;
            slug = format!("{base}_{n}");
        }
        self.used.insert(slug.clone());
        slug
    }
}
