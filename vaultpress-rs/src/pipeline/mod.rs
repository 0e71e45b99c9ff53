//! The conversion pipeline: an ordered list of named stages over a [`Document`].
//!
//! Each stage rewrites the document in place; the order is the data held by
//! [`Pipeline`], so it can be inspected, reordered, or run stage by stage in
//! tests.

pub mod stages;

use crate::config::Config;
use crate::error::{PressError, Result};
use crate::parser::frontmatter::Frontmatter;
use crate::parser::title::UNTITLED;
use crate::render::CodeHighlighter;
use crate::types::ParsedNote;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use stages::{
    CalloutStage, CodeFenceStage, EmbedStage, FrontmatterStage, HighlightStage, RenderStage,
    StructureStage, TitleStage, WikilinkStage,
};

/// Maps a raw image reference to the path emitted in `src`; `None` leaves
/// the reference as written.
pub type ImageResolver = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Intermediate state passed from stage to stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Current markdown text.
    pub text: String,
    pub frontmatter: Frontmatter,
    /// Originating file, for filename fallbacks and same-note links.
    pub source: Option<PathBuf>,
    /// Image references, in source order.
    pub images: Vec<String>,
    /// Wikilink targets, in source order.
    pub links: Vec<String>,
    /// Finished HTML fragments referenced by placeholders in `text`.
    pub stash: Vec<String>,
    /// Set by the render stage.
    pub html: Option<String>,
    /// Set by the title stage.
    pub title: Option<String>,
}

impl Document {
    pub fn new(text: impl Into<String>, source: Option<PathBuf>) -> Self {
        Self {
            text: text.into(),
            source,
            ..Self::default()
        }
    }

    /// File stem of the source, used as the implied note for `[[#Heading]]`.
    pub fn source_stem(&self) -> Option<String> {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .map(String::from)
    }

    /// Finish the document into a [`ParsedNote`].
    pub fn into_parsed(self) -> ParsedNote {
        ParsedNote {
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            html: self.html.unwrap_or_default(),
            frontmatter: self.frontmatter,
            source: self.source,
            images: self.images,
            links: self.links,
        }
    }
}

/// One pass over a document.
pub trait Stage: Send + Sync {
    /// Stable name used in logs and by [`Pipeline::stage_names`].
    fn name(&self) -> &'static str;

    fn apply(&self, doc: &mut Document);
}

/// An ordered sequence of stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// A pipeline running exactly `stages`, in order.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// The standard pipeline for a config.
    ///
    /// Code fences are frozen twice: once before callouts and once after, for
    /// fences that only become visible when callout bodies are unquoted. Both
    /// code-fence stages are left out when highlighting is off.
    pub fn from_config(config: &Config) -> Self {
        let code_fence = config.highlight_code.then(|| CodeFenceStage {
            highlighter: CodeHighlighter::new(&config.code_style),
        });

        let mut stages: Vec<Box<dyn Stage>> = Vec::with_capacity(10);
        stages.push(Box::new(FrontmatterStage));
        stages.push(Box::new(StructureStage {
            strip_navigation: config.strip_navigation,
            sections: config.strip_sections.clone(),
        }));
        stages.push(Box::new(HighlightStage));
        if let Some(ref stage) = code_fence {
            stages.push(Box::new(stage.clone()));
        }
        stages.push(Box::new(CalloutStage));
        if let Some(stage) = code_fence {
            stages.push(Box::new(stage));
        }
        stages.push(Box::new(EmbedStage::default()));
        stages.push(Box::new(WikilinkStage {
            mode: config.wikilink_mode,
        }));
        stages.push(Box::new(RenderStage));
        stages.push(Box::new(TitleStage {
            source: config.title_source,
        }));

        Self::new(stages)
    }

    /// Use `resolver` for image sources in every embed stage.
    pub fn with_image_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let resolver: ImageResolver = Arc::new(resolver);
        for stage in &mut self.stages {
            if stage.name() == "embed" {
                *stage = Box::new(EmbedStage {
                    resolver: Some(Arc::clone(&resolver)),
                });
            }
        }
        self
    }

    /// Append a stage.
    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `doc`.
    pub fn run(&self, doc: &mut Document) {
        for stage in &self.stages {
            tracing::trace!(stage = stage.name(), "applying stage");
            stage.apply(doc);
        }
    }

    /// Convert one note's text.
    pub fn convert(&self, content: &str, source: Option<&Path>) -> ParsedNote {
        let mut doc = Document::new(content, source.map(Path::to_path_buf));
        self.run(&mut doc);
        tracing::debug!(
            source = ?doc.source,
            images = doc.images.len(),
            links = doc.links.len(),
            "converted note"
        );
        doc.into_parsed()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Convert one note's text with `pipeline`.
pub fn convert_note(content: &str, source: Option<&Path>, pipeline: &Pipeline) -> ParsedNote {
    pipeline.convert(content, source)
}

/// Read and convert a list of files, in parallel, keeping input order.
///
/// Fails with [`PressError::NoInput`] for an empty list and with
/// [`PressError::SourceNotFound`] for the first path that is not a file;
/// nothing is read in either case.
pub fn convert_files(paths: &[PathBuf], pipeline: &Pipeline) -> Result<Vec<ParsedNote>> {
    if paths.is_empty() {
        return Err(PressError::NoInput);
    }
    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(PressError::SourceNotFound(missing.clone()));
    }

    tracing::info!(count = paths.len(), "converting notes");
    paths
        .par_iter()
        .map(|path| -> Result<ParsedNote> {
            let content = std::fs::read_to_string(path)?;
            Ok(pipeline.convert(&content, Some(path.as_path())))
        })
        .collect()
}
