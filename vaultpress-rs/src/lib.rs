//! Vaultpress - convert Obsidian-style notes into portable HTML fragments.
//!
//! # Overview
//!
//! Each note runs through a declared [`Pipeline`] of named stages:
//! - Frontmatter extraction (malformed YAML degrades to no frontmatter)
//! - Removal of Prev/Next navigation blocks and trailing sections
//! - `==highlight==` to `<mark>`
//! - Syntax highlighting of fenced code with inline styles
//! - Callout blocks to styled containers
//! - Image and note embeds
//! - Wikilinks, as plain text or styled spans
//! - Markdown rendering and title resolution
//!
//! The result is a [`ParsedNote`]: title, HTML fragment, frontmatter, and the
//! raw image references an e-book builder needs to collect assets.
//!
//! # Example
//!
//! ```no_run
//! use vaultpress::{convert_note, Config, Pipeline};
//!
//! let pipeline = Pipeline::from_config(&Config::default())
//!     .with_image_resolver(|reference| Some(vaultpress::assets::asset_placeholder(reference)));
//!
//! let note = convert_note("# Intro\n\n> [!tip] Hint\n> See [[Other Note]].", None, &pipeline);
//! println!("{}: {}", note.title, note.html);
//! ```

pub mod assets;
pub mod chapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;

// Re-export main types at crate root
pub use config::Config;
pub use error::{PressError, Result};
pub use parser::Frontmatter;
pub use pipeline::{convert_files, convert_note, Document, Pipeline, Stage};
pub use types::*;
