//! Chapter discovery: tagged notes in a folder, in chapter order.

use crate::error::{PressError, Result};
use crate::parser::frontmatter::{parse_frontmatter, Frontmatter};
use crate::parser::heading::first_heading;
use crate::parser::title::UNTITLED;
use glob::{glob, Pattern};
use serde::Serialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Sort key for notes without a usable chapter number.
pub const UNNUMBERED: i64 = 999;

/// A note selected as a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub path: PathBuf,
    pub number: i64,
    pub title: String,
}

/// Whether the note's tags contain `tag`, ignoring case.
pub fn has_tag(frontmatter: &Frontmatter, tag: &str) -> bool {
    frontmatter.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// The `Chapter` (or `chapter`) number, or [`UNNUMBERED`].
pub fn chapter_number(frontmatter: &Frontmatter) -> i64 {
    let value = frontmatter
        .get("Chapter")
        .filter(|v| !v.is_null())
        .or_else(|| frontmatter.get("chapter"));

    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(UNNUMBERED),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(UNNUMBERED),
        _ => UNNUMBERED,
    }
}

/// `aliases[0]`, else the first H1 of the body, else "Untitled".
pub fn chapter_title(frontmatter: &Frontmatter, body: &str) -> String {
    frontmatter
        .aliases
        .first()
        .cloned()
        .or_else(|| first_heading(body, 1))
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Find the `*.md` files directly in `folder` tagged with `tag`.
///
/// Results are ordered by chapter number, then path.
pub fn discover_chapters(folder: &Path, tag: &str) -> Result<Vec<Chapter>> {
    if !folder.is_dir() {
        return Err(PressError::FolderNotFound(folder.to_path_buf()));
    }

    let pattern = Path::new(&Pattern::escape(&folder.to_string_lossy())).join("*.md");
    let mut chapters = Vec::new();

    for entry in glob(&pattern.to_string_lossy())? {
        let path = match entry {
            Ok(path) if path.is_file() => path,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let (frontmatter, body) = parse_frontmatter(&content);
        if !has_tag(&frontmatter, tag) {
            continue;
        }

        let chapter = Chapter {
            number: chapter_number(&frontmatter),
            title: chapter_title(&frontmatter, body),
            path,
        };
        tracing::debug!(path = %chapter.path.display(), number = chapter.number, "found chapter");
        chapters.push(chapter);
    }

    chapters.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
    Ok(chapters)
}
