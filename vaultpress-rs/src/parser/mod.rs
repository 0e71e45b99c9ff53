//! Parsers and rewriters for Obsidian markdown syntax.

pub mod callout;
pub mod code_block;
pub mod embed;
pub mod frontmatter;
pub mod heading;
pub mod highlight;
pub mod structure;
pub mod title;
pub mod wikilink;

pub use callout::{callout_style, convert_callouts, CalloutStyle, CALLOUT_STYLES, DEFAULT_STYLE};
pub use code_block::{find_code_block_ranges, find_fenced_blocks, CodeBlockRange, FencedBlock};
pub use embed::{convert_embeds, extract_image_embeds, IMAGE_EXTENSIONS};
pub use frontmatter::{extract_frontmatter, parse_frontmatter, split_frontmatter, Frontmatter};
pub use heading::{first_heading, slugify, SlugCounter};
pub use highlight::convert_highlights;
pub use structure::{strip_navigation, strip_sections};
pub use title::resolve_title;
pub use wikilink::{convert_wikilinks, extract_wikilinks, WikiLink};
