//! Chapters command implementation.

use crate::chapters::{discover_chapters, Chapter};
use crate::cli::args::ChaptersArgs;
use crate::cli::output::Output;
use crate::error::{PressError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChaptersResponse {
    pub tag: String,
    pub chapters: Vec<Chapter>,
    pub total: usize,
}

pub fn run(args: &ChaptersArgs, output: &Output) -> Result<()> {
    let chapters = discover_chapters(&args.folder, &args.tag)?;
    if chapters.is_empty() {
        return Err(PressError::NoTaggedNotes(args.tag.clone()));
    }

    let total = chapters.len();
    output.print(&ChaptersResponse {
        tag: args.tag.clone(),
        chapters,
        total,
    })
}
