//! Code block detection for skipping parsing inside code.

use regex::Regex;
use std::sync::LazyLock;

/// A range of characters that are inside a code block or inline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number where the code block starts (1-indexed).
    pub start_line: usize,
    /// Line number where the code block ends (1-indexed).
    pub end_line: usize,
    /// Whether this is a fenced code block (vs inline code).
    pub is_fenced: bool,
}

/// A fenced code block with its info string and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset just past the closing fence (its newline excluded), or
    /// the end of the text for an unclosed fence.
    pub end: usize,
    /// Line number of the opening fence (1-indexed).
    pub start_line: usize,
    /// Line number of the closing fence (1-indexed).
    pub end_line: usize,
    /// Everything after the opening fence marker, trimmed.
    pub info: &'a str,
    /// Text between the fences, including the final newline.
    pub code: &'a str,
}

impl<'a> FencedBlock<'a> {
    /// The language tag: the first word of the info string, if any.
    pub fn language(&self) -> Option<&'a str> {
        self.info.split_whitespace().next()
    }
}

// Opening fence: up to three spaces of indent, then ``` or ~~~ (or longer)
static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(`{3,}|~{3,})(.*)$").unwrap()
});

// Matches inline code - simple pattern for single backticks
static INLINE_CODE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`[^`\n]+`").unwrap()
});

// Matches inline code with double backticks (can contain single backticks)
static INLINE_CODE_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"``(?:[^`]|`[^`])*``").unwrap()
});

/// Byte spans `(start, end)` of every line, newline excluded.
fn line_spans(content: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            spans.push((start, i));
            start = i + 1;
        }
    }
    spans.push((start, content.len()));
    spans
}

/// Find every closed fenced code block.
///
/// A block opens on a line starting with three or more backticks (or tildes)
/// and closes at the next line made only of at least as many of the same
/// character. An unclosed opener runs to the end of the text, as in CommonMark.
pub fn find_fenced_blocks(content: &str) -> Vec<FencedBlock<'_>> {
    let spans = line_spans(content);
    let mut blocks = Vec::new();
    let mut idx = 0;

    while idx < spans.len() {
        let (open_start, open_end) = spans[idx];
        let line = content[open_start..open_end].trim_end_matches('\r');

        let Some(cap) = FENCE_OPEN.captures(line) else {
            idx += 1;
            continue;
        };
        let fence = cap.get(1).unwrap().as_str();
        let fence_char = fence.chars().next().unwrap();
        let info = cap.get(2).unwrap().as_str().trim();

        // A backtick fence's info string may not contain backticks
        if fence_char == '`' && info.contains('`') {
            idx += 1;
            continue;
        }

        let close = spans
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|&(_, &(s, e))| {
                let trimmed = content[s..e].trim();
                trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == fence_char)
            });

        match close {
            Some((close_idx, &(close_start, close_end))) => {
                let code_start = (open_end + 1).min(close_start);
                blocks.push(FencedBlock {
                    start: open_start,
                    end: close_end,
                    start_line: idx + 1,
                    end_line: close_idx + 1,
                    info,
                    code: &content[code_start..close_start],
                });
                idx = close_idx + 1;
            }
            None => {
                blocks.push(FencedBlock {
                    start: open_start,
                    end: content.len(),
                    start_line: idx + 1,
                    end_line: spans.len(),
                    info,
                    code: &content[(open_end + 1).min(content.len())..],
                });
                break;
            }
        }
    }

    blocks
}

/// Find all code block and inline code ranges in content.
///
/// These ranges should be excluded when rewriting links, embeds, highlights.
pub fn find_code_block_ranges(content: &str) -> Vec<CodeBlockRange> {
    let mut ranges: Vec<CodeBlockRange> = find_fenced_blocks(content)
        .into_iter()
        .map(|b| CodeBlockRange {
            start: b.start,
            end: b.end,
            start_line: b.start_line,
            end_line: b.end_line,
            is_fenced: true,
        })
        .collect();

    // Find inline code (but not inside fenced blocks)
    for m in INLINE_CODE_DOUBLE.find_iter(content) {
        let start = m.start();
        let end = m.end();

        if ranges.iter().any(|r| r.is_fenced && start < r.end && end > r.start) {
            continue;
        }

        ranges.push(CodeBlockRange {
            start,
            end,
            start_line: content[..start].matches('\n').count() + 1,
            end_line: content[..end].matches('\n').count() + 1,
            is_fenced: false,
        });
    }

    for m in INLINE_CODE_SINGLE.find_iter(content) {
        let start = m.start();
        let end = m.end();

        // Skip if overlapping with any existing range (fenced block or double backtick)
        if ranges.iter().any(|r| start < r.end && end > r.start) {
            continue;
        }

        ranges.push(CodeBlockRange {
            start,
            end,
            start_line: content[..start].matches('\n').count() + 1,
            end_line: content[..end].matches('\n').count() + 1,
            is_fenced: false,
        });
    }

    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Check if a byte offset is inside any code block.
pub fn is_in_code_block(offset: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges.iter().any(|r| offset >= r.start && offset < r.end)
}

/// Check if a line number is inside any fenced code block.
pub fn is_line_in_fenced_code_block(line: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges
        .iter()
        .any(|r| r.is_fenced && line >= r.start_line && line <= r.end_line)
}

/// Apply `replace` to every regex match that is not inside code.
///
/// Matches that start inside a code range are left untouched.
pub fn replace_outside_code<F>(content: &str, re: &Regex, mut replace: F) -> String
where
    F: FnMut(&regex::Captures<'_>) -> String,
{
    let ranges = find_code_block_ranges(content);
    re.replace_all(content, |caps: &regex::Captures<'_>| {
        let m = caps.get(0).unwrap();
        if is_in_code_block(m.start(), &ranges) {
            m.as_str().to_string()
        } else {
            replace(caps)
        }
    })
    .into_owned()
}
