//! Obsidian callout blocks (`> [!note] Title`) to styled HTML containers.
//!
//! Callouts are found by a line scanner rather than a single regex: the header
//! is one line, but the body is a variable run of quoted continuation lines
//! that may include single blank lines between paragraphs.

use crate::parser::code_block::{find_code_block_ranges, is_line_in_fenced_code_block};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Styling for one callout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalloutStyle {
    /// Accent color used for the border and the title.
    pub color: &'static str,
    /// Tinted background color.
    pub background: &'static str,
    /// Title shown when the callout has no custom title.
    pub label: &'static str,
}

impl CalloutStyle {
    const fn new(color: &'static str, background: &'static str, label: &'static str) -> Self {
        Self {
            color,
            background,
            label,
        }
    }
}

const BLUE: (&str, &str) = ("#448aff", "#e3f2fd");
const GREEN: (&str, &str) = ("#00c853", "#e8f5e9");
const YELLOW: (&str, &str) = ("#ffb300", "#fff8e1");
const ORANGE: (&str, &str) = ("#ff9100", "#fff3e0");
const RED: (&str, &str) = ("#ff5252", "#ffebee");
const PURPLE: (&str, &str) = ("#7c4dff", "#ede7f6");
const GRAY: (&str, &str) = ("#9e9e9e", "#f5f5f5");

/// Style for callout types that are not in the registry.
pub const DEFAULT_STYLE: CalloutStyle = CalloutStyle::new(GRAY.0, GRAY.1, "Note");

/// Known callout types keyed by lowercase name, matching Obsidian's defaults.
pub static CALLOUT_STYLES: LazyLock<HashMap<&'static str, CalloutStyle>> = LazyLock::new(|| {
    let families: [((&str, &str), &[(&str, &str)]); 7] = [
        (
            BLUE,
            &[
                ("note", "Note"),
                ("info", "Info"),
                ("abstract", "Abstract"),
                ("summary", "Summary"),
                ("tldr", "TL;DR"),
            ],
        ),
        (
            GREEN,
            &[
                ("tip", "Tip"),
                ("hint", "Hint"),
                ("important", "Important"),
                ("success", "Success"),
                ("check", "Check"),
                ("done", "Done"),
            ],
        ),
        (
            YELLOW,
            &[("question", "Question"), ("help", "Help"), ("faq", "FAQ")],
        ),
        (
            ORANGE,
            &[
                ("warning", "Warning"),
                ("caution", "Caution"),
                ("attention", "Attention"),
            ],
        ),
        (
            RED,
            &[
                ("danger", "Danger"),
                ("error", "Error"),
                ("failure", "Failure"),
                ("fail", "Fail"),
                ("missing", "Missing"),
                ("bug", "Bug"),
            ],
        ),
        (PURPLE, &[("example", "Example")]),
        (GRAY, &[("quote", "Quote"), ("cite", "Cite")]),
    ];

    families
        .iter()
        .flat_map(|&((color, background), kinds)| {
            kinds
                .iter()
                .map(move |&(name, label)| (name, CalloutStyle::new(color, background, label)))
        })
        .collect()
});

/// Look up the style for a callout type, case-insensitively.
pub fn callout_style(kind: &str) -> &'static CalloutStyle {
    CALLOUT_STYLES
        .get(kind.to_lowercase().as_str())
        .unwrap_or(&DEFAULT_STYLE)
}

// > [!type]+ Optional title
static CALLOUT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>\s*\[!([^\]\s]+)\]([+-])?\s*(.*)$").unwrap()
});

/// A parsed callout header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutHeader<'a> {
    /// The type name as written (`NOTE`, `warning`, ...).
    pub kind: &'a str,
    /// `+` or `-` fold marker; accepted and ignored.
    pub fold: Option<char>,
    /// Custom title, trimmed; `None` when absent or whitespace-only.
    pub title: Option<&'a str>,
}

impl CalloutHeader<'_> {
    pub fn style(&self) -> &'static CalloutStyle {
        callout_style(self.kind)
    }

    /// The custom title if present, otherwise the style's label.
    pub fn display_title(&self) -> &str {
        self.title.unwrap_or(self.style().label)
    }
}

/// Parse a callout header line.
pub fn parse_callout_header(line: &str) -> Option<CalloutHeader<'_>> {
    let cap = CALLOUT_HEADER.captures(line.trim_end_matches('\r'))?;
    let title = cap.get(3).map(|m| m.as_str().trim()).filter(|t| !t.is_empty());

    Some(CalloutHeader {
        kind: cap.get(1)?.as_str(),
        fold: cap.get(2).and_then(|m| m.as_str().chars().next()),
        title,
    })
}

/// How the scanner treats a line that follows a callout header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation<'a> {
    /// A quoted line; carries the text with one `>` and one space removed.
    Quoted(&'a str),
    /// A blank line directly followed by another quoted line.
    InteriorBlank,
    /// Anything else ends the callout and is not consumed.
    End,
}

/// Classify `line` given the line after it.
pub fn classify_continuation<'a>(line: &'a str, next: Option<&str>) -> Continuation<'a> {
    if let Some(rest) = line.strip_prefix('>') {
        return Continuation::Quoted(rest.strip_prefix(' ').unwrap_or(rest));
    }
    if line.trim().is_empty() && next.is_some_and(|n| n.starts_with('>')) {
        return Continuation::InteriorBlank;
    }
    Continuation::End
}

/// Scanner state.
#[derive(Debug)]
pub enum ScanState<'a> {
    Scanning,
    InCallout {
        header: CalloutHeader<'a>,
        body: Vec<&'a str>,
    },
}

impl<'a> ScanState<'a> {
    /// Feed one line. Returns the next state and whether the line was consumed.
    pub fn step(self, line: &'a str, next: Option<&str>, out: &mut Vec<String>) -> (Self, bool) {
        match self {
            ScanState::Scanning => match parse_callout_header(line) {
                Some(header) => (
                    ScanState::InCallout {
                        header,
                        body: Vec::new(),
                    },
                    true,
                ),
                None => {
                    out.push(line.to_string());
                    (ScanState::Scanning, true)
                }
            },
            ScanState::InCallout { header, mut body } => match classify_continuation(line, next) {
                Continuation::Quoted(text) => {
                    body.push(text);
                    (ScanState::InCallout { header, body }, true)
                }
                Continuation::InteriorBlank => {
                    body.push("");
                    (ScanState::InCallout { header, body }, true)
                }
                Continuation::End => {
                    out.push(render_callout(&header, &body.join("\n")));
                    // Keep the closing tags out of the following paragraph
                    if !line.trim().is_empty() {
                        out.push(String::new());
                    }
                    (ScanState::Scanning, false)
                }
            },
        }
    }

    /// Flush a callout that runs to the end of the document.
    pub fn finish(self, out: &mut Vec<String>) {
        if let ScanState::InCallout { header, body } = self {
            out.push(render_callout(&header, &body.join("\n")));
        }
    }
}

/// Restrict a type name to characters that are safe in a class attribute.
pub fn sanitize_class(kind: &str) -> String {
    kind.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Build the container for one callout.
///
/// The body stays markdown and is surrounded by blank lines so the renderer
/// treats it as its own block.
pub fn render_callout(header: &CalloutHeader<'_>, body: &str) -> String {
    let style = header.style();
    let container_style = format!(
        "border-left: 4px solid {}; background-color: {}; padding: 12px 16px; margin: 16px 0; border-radius: 4px;",
        style.color, style.background
    );
    let title_style = format!(
        "color: {}; font-weight: bold; margin: 0 0 8px 0; font-size: 1em;",
        style.color
    );

    format!(
        "<div class=\"callout callout-{kind}\" style=\"{container_style}\">\n\
         <p class=\"callout-title\" style=\"{title_style}\">{title}</p>\n\
         <div class=\"callout-content\" style=\"margin: 0; line-height: 1.6;\">\n\
         \n\
         {body}\n\
         \n\
         </div>\n\
         </div>",
        kind = sanitize_class(header.kind),
        title = html_escape::encode_text(header.display_title()),
    )
}

/// Convert every callout in `content` into a styled container.
///
/// Nested callouts are not recognized: a quoted header inside a callout body
/// is ordinary body text.
pub fn convert_callouts(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let code_ranges = find_code_block_ranges(content);
    let mut out = Vec::with_capacity(lines.len());
    let mut state = ScanState::Scanning;
    let mut idx = 0;

    while idx < lines.len() {
        if matches!(state, ScanState::Scanning) && is_line_in_fenced_code_block(idx + 1, &code_ranges) {
            out.push(lines[idx].to_string());
            idx += 1;
            continue;
        }
        let (next_state, consumed) = state.step(lines[idx], lines.get(idx + 1).copied(), &mut out);
        state = next_state;
        if consumed {
            idx += 1;
        }
    }
    state.finish(&mut out);

    out.join("\n")
}
