//! Convert command implementation.

use crate::assets::asset_placeholder;
use crate::cli::args::ConvertArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{PressError, Result};
use crate::parser::frontmatter::Frontmatter;
use crate::pipeline::{convert_files, Pipeline};
use crate::types::ParsedNote;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub notes: Vec<ConvertedNote>,
    pub total: usize,
}

/// One converted note. `html` is inline unless it was written to `output`.
#[derive(Debug, Serialize)]
pub struct ConvertedNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub images: Vec<String>,
    pub links: Vec<String>,
    pub frontmatter: Frontmatter,
}

pub fn run(mut config: Config, args: &ConvertArgs, output: &Output) -> Result<()> {
    // Building the pipeline loads the highlighter themes
    if args.files.is_empty() {
        return Err(PressError::NoInput);
    }
    args.apply_to(&mut config);

    let mut pipeline = Pipeline::from_config(&config);
    if args.asset_placeholders {
        pipeline = pipeline.with_image_resolver(|reference| Some(asset_placeholder(reference)));
    }
    tracing::debug!(stages = ?pipeline.stage_names(), "pipeline ready");

    let notes = convert_files(&args.files, &pipeline)?;

    if let Some(ref dir) = args.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut converted = Vec::with_capacity(notes.len());
    for note in notes {
        let written = match args.out_dir {
            Some(ref dir) => Some(write_fragment(dir, &note)?),
            None => None,
        };
        converted.push(summarize(note, written));
    }

    if let Some(ref dir) = args.out_dir {
        output.info(&format!("Wrote {} fragment(s) to {}", converted.len(), dir.display()));
    }

    let total = converted.len();
    output.print(&ConvertResponse {
        notes: converted,
        total,
    })
}

/// Write `<stem>.html` into `dir` and return its path.
fn write_fragment(dir: &Path, note: &ParsedNote) -> Result<PathBuf> {
    let stem = note
        .source
        .as_deref()
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "note".to_string());
    let path = dir.join(format!("{stem}.html"));
    std::fs::write(&path, &note.html)?;
    tracing::debug!(path = %path.display(), "wrote fragment");
    Ok(path)
}

fn summarize(note: ParsedNote, written: Option<PathBuf>) -> ConvertedNote {
    let html = written.is_none().then_some(note.html);
    ConvertedNote {
        source: note.source,
        title: note.title,
        output: written,
        html,
        images: note.images,
        links: note.links,
        frontmatter: note.frontmatter,
    }
}
