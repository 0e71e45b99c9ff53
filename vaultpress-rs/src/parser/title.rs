//! Chapter title resolution.
//!
//! The title comes from the first candidate in a fixed cascade that yields a
//! value; [`TitleSource`] selects which candidates take part.

use crate::parser::frontmatter::Frontmatter;
use crate::parser::heading::first_heading;
use crate::types::TitleSource;
use std::path::Path;

/// One step of the cascade.
pub type TitleCandidate = fn(&Frontmatter, &str, Option<&Path>) -> Option<String>;

/// Title used when every candidate comes up empty.
pub const UNTITLED: &str = "Untitled";

/// First entry of the `aliases` list.
pub fn from_aliases(frontmatter: &Frontmatter, _body: &str, _source: Option<&Path>) -> Option<String> {
    frontmatter.aliases.first().cloned()
}

/// The `title` field.
pub fn from_title_field(frontmatter: &Frontmatter, _body: &str, _source: Option<&Path>) -> Option<String> {
    frontmatter
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// The first level-1 heading in the body.
pub fn from_first_heading(_frontmatter: &Frontmatter, body: &str, _source: Option<&Path>) -> Option<String> {
    first_heading(body, 1)
}

/// The source filename with `-`/`_` turned into spaces, title-cased.
pub fn from_filename(_frontmatter: &Frontmatter, _body: &str, source: Option<&Path>) -> Option<String> {
    let stem = source?.file_stem()?.to_str()?;
    let spaced = stem.replace(['-', '_'], " ");
    Some(title_case(&spaced))
}

/// Uppercase each letter that follows a non-letter, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

const AUTO: &[TitleCandidate] = &[from_aliases, from_title_field, from_first_heading, from_filename];
const FRONTMATTER_ONLY: &[TitleCandidate] = &[from_aliases, from_title_field, from_filename];
const HEADING_ONLY: &[TitleCandidate] = &[from_first_heading, from_filename];
const FILENAME_ONLY: &[TitleCandidate] = &[from_filename];

/// The candidates consulted for a given source, in priority order.
///
/// Every mode falls back to the filename before giving up.
pub fn cascade(source: TitleSource) -> &'static [TitleCandidate] {
    match source {
        TitleSource::Auto => AUTO,
        TitleSource::Frontmatter => FRONTMATTER_ONLY,
        TitleSource::Heading => HEADING_ONLY,
        TitleSource::Filename => FILENAME_ONLY,
    }
}

/// Resolve a note's title.
pub fn resolve_title(
    frontmatter: &Frontmatter,
    body: &str,
    source_path: Option<&Path>,
    source: TitleSource,
) -> String {
    cascade(source)
        .iter()
        .find_map(|candidate| candidate(frontmatter, body, source_path))
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::frontmatter::parse_frontmatter;
    use pretty_assertions::assert_eq;

    fn chapter_one() -> Frontmatter {
        parse_frontmatter("---\naliases: [\"Ch. 1\"]\ntitle: Chapter One\n---\n").0
    }

    #[test]
    fn test_auto_prefers_alias() {
        let title = resolve_title(&chapter_one(), "# Intro\ntext", None, TitleSource::Auto);
        assert_eq!(title, "Ch. 1");
    }

    #[test]
    fn test_heading_only() {
        let title = resolve_title(&chapter_one(), "# Intro\ntext", None, TitleSource::Heading);
        assert_eq!(title, "Intro");
    }

    #[test]
    fn test_title_field_when_no_alias() {
        let (fm, _) = parse_frontmatter("---\ntitle: Chapter One\n---\n");
        assert_eq!(resolve_title(&fm, "# Intro", None, TitleSource::Auto), "Chapter One");
        assert_eq!(resolve_title(&fm, "# Intro", None, TitleSource::Frontmatter), "Chapter One");
    }

    #[test]
    fn test_heading_found_anywhere() {
        let fm = Frontmatter::default();
        let body = "Some text\n\n## Sub\n\n# Late Heading\n";
        assert_eq!(resolve_title(&fm, body, None, TitleSource::Auto), "Late Heading");
    }

    #[test]
    fn test_filename_fallback() {
        let fm = Frontmatter::default();
        let path = Path::new("notes/my-first_note.md");
        assert_eq!(resolve_title(&fm, "no heading", Some(path), TitleSource::Auto), "My First Note");
        assert_eq!(
            resolve_title(&chapter_one(), "# Intro", Some(path), TitleSource::Filename),
            "My First Note"
        );
    }

    #[test]
    fn test_frontmatter_mode_skips_heading() {
        let fm = Frontmatter::default();
        let path = Path::new("chapter-two.md");
        assert_eq!(
            resolve_title(&fm, "# Heading", Some(path), TitleSource::Frontmatter),
            "Chapter Two"
        );
    }

    #[test]
    fn test_untitled() {
        let fm = Frontmatter::default();
        assert_eq!(resolve_title(&fm, "plain body", None, TitleSource::Auto), "Untitled");
        assert_eq!(resolve_title(&fm, "# H", None, TitleSource::Filename), "Untitled");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("API design"), "Api Design");
        assert_eq!(title_case("v2 notes"), "V2 Notes");
    }
}
