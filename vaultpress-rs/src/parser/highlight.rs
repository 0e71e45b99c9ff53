//! `==highlighted==` text to `<mark>` conversion.

use crate::parser::code_block::replace_outside_code;
use regex::Regex;
use std::sync::LazyLock;

// The enclosed text may span lines but may not start or end with whitespace
// or contain `=`, which keeps setext underlines and `a == b` prose intact.
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"==([^=\s](?:[^=]*[^=\s])?)==").unwrap()
});

/// Wrap every `==text==` pair outside code in `<mark>`, keeping the text verbatim.
pub fn convert_highlights(content: &str) -> String {
    replace_outside_code(content, &HIGHLIGHT, |caps| format!("<mark>{}</mark>", &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_highlight() {
        assert_eq!(
            convert_highlights("This is ==important== text."),
            "This is <mark>important</mark> text."
        );
    }

    #[test]
    fn test_multiple_highlights() {
        assert_eq!(
            convert_highlights("==a== and ==b c=="),
            "<mark>a</mark> and <mark>b c</mark>"
        );
    }

    #[test]
    fn test_highlight_spanning_lines() {
        assert_eq!(
            convert_highlights("==first line\nsecond line=="),
            "<mark>first line\nsecond line</mark>"
        );
    }

    #[test]
    fn test_highlight_inside_code_untouched() {
        let content = "`x ==y==`\n```\n==z==\n```";
        assert_eq!(convert_highlights(content), content);
    }

    #[test]
    fn test_setext_and_comparisons_untouched() {
        let content = "Title\n=====\n\nif a == b == c";
        assert_eq!(convert_highlights(content), content);
    }

    #[test]
    fn test_idempotent() {
        let once = convert_highlights("==mark me==");
        assert_eq!(convert_highlights(&once), once);
    }
}
