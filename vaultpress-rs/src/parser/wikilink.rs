//! Wikilink parsing and rewriting.

use crate::parser::code_block::{find_code_block_ranges, is_in_code_block, replace_outside_code};
use crate::types::WikilinkMode;
use regex::Regex;
use std::sync::LazyLock;

// (!)?              - Optional ! marking an embed (group 1), never rewritten here
// \[\[              - Opening [[
// ([^\]|]+)         - Target, possibly with #heading or #^block (group 2)
// (?:\|([^\]]+))?   - Display text (group 3)
// \]\]              - Closing ]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap()
});

/// A wikilink split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Note name; empty for same-note links like `[[#Heading]]`.
    pub note: String,
    /// Heading fragment after `#`.
    pub heading: Option<String>,
    /// Block reference after `#^`.
    pub block_id: Option<String>,
    /// Explicit display text after `|`.
    pub alias: Option<String>,
}

impl WikiLink {
    /// Split a raw `target` and optional `|display` part.
    pub fn parse(target: &str, alias: Option<&str>) -> Self {
        let target = target.trim();
        let (note, fragment) = match target.split_once('#') {
            Some((note, fragment)) => (note.trim(), Some(fragment.trim())),
            None => (target, None),
        };

        let (heading, block_id) = match fragment {
            Some(f) => match f.strip_prefix('^') {
                Some(block) => (None, Some(block.to_string())),
                None => (Some(f.to_string()), None),
            },
            None => (None, None),
        };

        Self {
            note: note.to_string(),
            heading,
            block_id,
            alias: alias.map(String::from),
        }
    }

    /// Text shown for the link.
    ///
    /// An empty note name falls back to `current_note`. Without an alias a
    /// heading link reads `Note > Heading` (or just `Heading` when there is
    /// still no note name).
    pub fn display_text(&self, current_note: Option<&str>) -> String {
        if let Some(ref alias) = self.alias {
            return alias.clone();
        }

        let note = if self.note.is_empty() {
            current_note.unwrap_or("")
        } else {
            self.note.as_str()
        };

        match self.heading {
            Some(ref heading) if note.is_empty() => heading.clone(),
            Some(ref heading) => format!("{note} > {heading}"),
            None => note.to_string(),
        }
    }
}

/// Render one link in the requested mode.
pub fn render_wikilink(display: &str, mode: WikilinkMode) -> String {
    match mode {
        WikilinkMode::Strip => display.to_string(),
        WikilinkMode::Styled => format!("<span class=\"wikilink\">{display}</span>"),
    }
}

/// Rewrite every wikilink outside code. Embeds (`![[...]]`) are left alone.
pub fn convert_wikilinks(content: &str, mode: WikilinkMode, current_note: Option<&str>) -> String {
    replace_outside_code(content, &WIKILINK, |caps| {
        if !caps[1].is_empty() {
            return caps[0].to_string();
        }
        let link = WikiLink::parse(&caps[2], caps.get(3).map(|m| m.as_str()));
        render_wikilink(&link.display_text(current_note), mode)
    })
}

/// List wikilink targets (heading fragments stripped) in source order.
///
/// Embeds and same-note links are skipped.
pub fn extract_wikilinks(content: &str) -> Vec<String> {
    let code_ranges = find_code_block_ranges(content);
    WIKILINK
        .captures_iter(content)
        .filter(|cap| cap[1].is_empty())
        .filter(|cap| !is_in_code_block(cap.get(0).unwrap().start(), &code_ranges))
        .map(|cap| WikiLink::parse(&cap[2], None).note)
        .filter(|note| !note.is_empty())
        .collect()
}
