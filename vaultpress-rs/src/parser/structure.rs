//! Removal of non-content structure: navigation footers and trailing sections.
//!
//! Both passes are pure deletions and never touch lines inside fenced code.

use crate::parser::code_block::{find_code_block_ranges, is_line_in_fenced_code_block};
use regex::Regex;
use std::sync::LazyLock;

// Thematic break: three or more of the same -, * or _ (spaces allowed)
static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$").unwrap()
});

// Wikilinks, embeds and markdown links that may appear on a navigation line
static NAV_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[\[[^\]]*\]\]|\[[^\]]*\]\([^)]*\)").unwrap()
});

static NAV_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:prev(?:ious)?|next)\b").unwrap()
});

static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").unwrap()
});

/// Whether a line consists of nothing but Prev/Next links and separators.
///
/// `← Prev: [[Chapter 1]] | Next: [[Chapter 3]] →` qualifies; a line with any
/// other words does not.
pub fn is_navigation_line(line: &str) -> bool {
    if !NAV_LINK.is_match(line) || !NAV_WORD.is_match(line) {
        return false;
    }
    let without_links = NAV_LINK.replace_all(line, " ");
    let leftover = NAV_WORD.replace_all(&without_links, " ");
    !leftover.chars().any(char::is_alphanumeric)
}

/// Remove horizontal-rule-delimited regions containing only navigation lines.
///
/// The region must hold at least one navigation line; blank lines inside it
/// are allowed. Both delimiting rules are removed with it.
pub fn strip_navigation(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let code_ranges = find_code_block_ranges(content);
    let is_rule = |idx: usize| {
        !is_line_in_fenced_code_block(idx + 1, &code_ranges)
            && HORIZONTAL_RULE.is_match(lines[idx].trim_end_matches('\r'))
    };

    let mut kept = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        if is_rule(idx) {
            if let Some(close) = navigation_region_end(&lines, idx, &is_rule) {
                tracing::debug!(start = idx + 1, end = close + 1, "stripping navigation block");
                idx = close + 1;
                continue;
            }
        }
        kept.push(lines[idx]);
        idx += 1;
    }

    kept.join("\n")
}

/// Index of the closing rule when `open` starts a navigation region.
fn navigation_region_end(
    lines: &[&str],
    open: usize,
    is_rule: &impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut saw_navigation = false;
    for idx in open + 1..lines.len() {
        if is_rule(idx) {
            return saw_navigation.then_some(idx);
        }
        let line = lines[idx].trim();
        if line.is_empty() {
            continue;
        }
        if !is_navigation_line(line) {
            return None;
        }
        saw_navigation = true;
    }
    None
}

/// Remove each level-2 section whose heading matches one of `headings`.
///
/// Matching is case-insensitive on the heading text. The section runs up to,
/// but not including, the next level-1 heading or the end of the document.
pub fn strip_sections(content: &str, headings: &[String]) -> String {
    if headings.is_empty() {
        return content.to_string();
    }

    let code_ranges = find_code_block_ranges(content);
    let mut kept = Vec::new();
    let mut stripping = false;

    for (idx, line) in content.split('\n').enumerate() {
        let heading = if is_line_in_fenced_code_block(idx + 1, &code_ranges) {
            None
        } else {
            ATX_HEADING.captures(line.trim_end_matches('\r'))
        };

        if let Some(cap) = heading {
            let level = cap[1].len();
            if stripping && level == 1 {
                stripping = false;
            } else if !stripping && level == 2 {
                let text = cap[2].trim();
                if headings.iter().any(|h| h.trim().eq_ignore_ascii_case(text)) {
                    tracing::debug!(line = idx + 1, section = text, "stripping section");
                    stripping = true;
                }
            }
        }

        if !stripping {
            kept.push(line);
        }
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn connections() -> Vec<String> {
        vec!["Connections".to_string()]
    }

    #[test]
    fn test_navigation_line_detection() {
        assert!(is_navigation_line("← Prev: [[Chapter 1]] | Next: [[Chapter 3]] →"));
        assert!(is_navigation_line("[[Chapter 2|Next →]]"));
        assert!(is_navigation_line("**Previous:** [Intro](intro.md)"));
        assert!(!is_navigation_line("Next we discuss [[Chapter 3]] in depth"));
        assert!(!is_navigation_line("Prev and next without links"));
    }

    #[test]
    fn test_strip_navigation_block() {
        let content = "Body text\n\n---\n← Prev: [[Ch 1]] | Next: [[Ch 3]] →\n---\n\nMore";
        assert_eq!(strip_navigation(content), "Body text\n\n\nMore");
    }

    #[test]
    fn test_navigation_block_with_blank_lines() {
        let content = "A\n***\n\nPrev: [[One]]\n\nNext: [[Three]]\n\n***\nB";
        assert_eq!(strip_navigation(content), "A\nB");
    }

    #[test]
    fn test_plain_rules_survive() {
        let content = "Top\n\n---\n\nMiddle paragraph\n\n---\n\nBottom";
        assert_eq!(strip_navigation(content), content);
    }

    #[test]
    fn test_empty_rule_pair_survives() {
        let content = "Top\n---\n\n---\nBottom";
        assert_eq!(strip_navigation(content), content);
    }

    #[test]
    fn test_strip_connections_to_end() {
        let content = "# Title\n\nBody\n\n## Connections\n- [[A]]\n- [[B]]\n";
        assert_eq!(strip_sections(content, &connections()), "# Title\n\nBody\n");
    }

    #[test]
    fn test_strip_connections_until_next_h1() {
        let content = "# One\n## connections\n- [[A]]\n### Deeper\n- [[B]]\n# Two\ntext";
        assert_eq!(
            strip_sections(content, &connections()),
            "# One\n# Two\ntext"
        );
    }

    #[test]
    fn test_other_h2_sections_kept() {
        let content = "# T\n## Details\ntext\n## Connections\nlinks\n## Later\nmore";
        assert_eq!(
            strip_sections(content, &connections()),
            "# T\n## Details\ntext"
        );
    }

    #[test]
    fn test_heading_inside_code_untouched() {
        let content = "```md\n## Connections\n```\nafter";
        assert_eq!(strip_sections(content, &connections()), content);
    }

    #[test]
    fn test_absent_patterns_are_noop() {
        let content = "# Title\n\nNothing to strip here.";
        assert_eq!(strip_sections(content, &connections()), content);
        assert_eq!(strip_navigation(content), content);
    }
}
