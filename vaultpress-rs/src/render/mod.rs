//! HTML rendering: syntax-highlighted code and the generic markdown pass.
//!
//! Code blocks are rendered early and parked in a stash of frozen fragments.
//! The text keeps only an inert placeholder line per block until the markdown
//! renderer swaps the fragments back in.

pub mod code;
pub mod markdown;

pub use code::{freeze_code_blocks, CodeHighlighter, DEFAULT_THEME};
pub use markdown::{render_markdown, restore_fragments};

/// Placeholder for stash entry `index`.
///
/// The control characters cannot be typed into a note, so the token never
/// collides with real content.
pub fn fragment_placeholder(index: usize) -> String {
    format!("\u{2}fence:{index}\u{3}")
}
