//! Shared types for Vaultpress.

use crate::parser::frontmatter::Frontmatter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A note after it has gone through the full conversion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedNote {
    /// Resolved chapter title.
    pub title: String,

    /// Rendered HTML fragment (image sources may still be placeholders).
    pub html: String,

    /// Metadata extracted from the note's frontmatter block.
    pub frontmatter: Frontmatter,

    /// Path of the originating note, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Raw image references in source order, as written in the embeds.
    pub images: Vec<String>,

    /// Wikilink targets (heading fragments stripped) in source order.
    pub links: Vec<String>,
}

/// How `[[wikilinks]]` are rewritten.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WikilinkMode {
    /// Emit only the display text.
    #[default]
    Strip,
    /// Wrap the display text in `<span class="wikilink">`.
    Styled,
}

/// Which sources the title resolver may consult.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TitleSource {
    /// aliases[0], then title, then first H1, then filename.
    #[default]
    Auto,
    /// aliases[0], then title, then filename.
    Frontmatter,
    /// First H1, then filename.
    Heading,
    /// Filename only.
    Filename,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_deserialize_lowercase() {
        let mode: WikilinkMode = serde_json::from_str("\"styled\"").unwrap();
        assert_eq!(mode, WikilinkMode::Styled);

        let source: TitleSource = serde_json::from_str("\"heading\"").unwrap();
        assert_eq!(source, TitleSource::Heading);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(WikilinkMode::default(), WikilinkMode::Strip);
        assert_eq!(TitleSource::default(), TitleSource::Auto);
    }
}
