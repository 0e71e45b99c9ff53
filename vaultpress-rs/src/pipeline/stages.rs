//! The standard conversion stages, one per pass.

use crate::parser::callout::convert_callouts;
use crate::parser::embed::{convert_embeds, extract_image_embeds};
use crate::parser::frontmatter::parse_frontmatter;
use crate::parser::highlight::convert_highlights;
use crate::parser::structure::{strip_navigation, strip_sections};
use crate::parser::title::resolve_title;
use crate::parser::wikilink::{convert_wikilinks, extract_wikilinks};
use crate::pipeline::{Document, ImageResolver, Stage};
use crate::render::{freeze_code_blocks, render_markdown, CodeHighlighter};
use crate::types::{TitleSource, WikilinkMode};

/// Splits the frontmatter block off the text.
#[derive(Debug, Default)]
pub struct FrontmatterStage;

impl Stage for FrontmatterStage {
    fn name(&self) -> &'static str {
        "frontmatter"
    }

    fn apply(&self, doc: &mut Document) {
        let (frontmatter, body) = parse_frontmatter(&doc.text);
        let body = body.to_string();
        doc.frontmatter = frontmatter;
        doc.text = body;
    }
}

/// Removes navigation blocks and configured trailing sections.
#[derive(Debug, Clone)]
pub struct StructureStage {
    pub strip_navigation: bool,
    pub sections: Vec<String>,
}

impl Stage for StructureStage {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn apply(&self, doc: &mut Document) {
        if self.strip_navigation {
            doc.text = strip_navigation(&doc.text);
        }
        if !self.sections.is_empty() {
            doc.text = strip_sections(&doc.text, &self.sections);
        }
    }
}

/// `==text==` to `<mark>`.
#[derive(Debug, Default)]
pub struct HighlightStage;

impl Stage for HighlightStage {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn apply(&self, doc: &mut Document) {
        doc.text = convert_highlights(&doc.text);
    }
}

/// Highlights fenced code and freezes it into the stash.
#[derive(Debug, Clone, Default)]
pub struct CodeFenceStage {
    pub highlighter: CodeHighlighter,
}

impl Stage for CodeFenceStage {
    fn name(&self) -> &'static str {
        "code-fence"
    }

    fn apply(&self, doc: &mut Document) {
        doc.text = freeze_code_blocks(&doc.text, &self.highlighter, &mut doc.stash);
    }
}

/// Callout blocks to styled containers.
#[derive(Debug, Default)]
pub struct CalloutStage;

impl Stage for CalloutStage {
    fn name(&self) -> &'static str {
        "callout"
    }

    fn apply(&self, doc: &mut Document) {
        doc.text = convert_callouts(&doc.text);
    }
}

/// Records image references, then rewrites embeds.
#[derive(Default)]
pub struct EmbedStage {
    pub resolver: Option<ImageResolver>,
}

impl Stage for EmbedStage {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn apply(&self, doc: &mut Document) {
        doc.images.extend(extract_image_embeds(&doc.text));
        let resolve: Option<&dyn Fn(&str) -> Option<String>> = match &self.resolver {
            Some(resolver) => Some(&**resolver),
            None => None,
        };
        doc.text = convert_embeds(&doc.text, resolve);
    }
}

/// Records link targets, then rewrites wikilinks.
#[derive(Debug, Clone, Default)]
pub struct WikilinkStage {
    pub mode: WikilinkMode,
}

impl Stage for WikilinkStage {
    fn name(&self) -> &'static str {
        "wikilink"
    }

    fn apply(&self, doc: &mut Document) {
        doc.links.extend(extract_wikilinks(&doc.text));
        let current = doc.source_stem();
        doc.text = convert_wikilinks(&doc.text, self.mode, current.as_deref());
    }
}

/// Markdown to HTML, with stashed fragments restored.
#[derive(Debug, Default)]
pub struct RenderStage;

impl Stage for RenderStage {
    fn name(&self) -> &'static str {
        "render"
    }

    fn apply(&self, doc: &mut Document) {
        doc.html = Some(render_markdown(&doc.text, &doc.stash));
    }
}

/// Picks the chapter title from the processed text.
#[derive(Debug, Clone, Default)]
pub struct TitleStage {
    pub source: TitleSource,
}

impl Stage for TitleStage {
    fn name(&self) -> &'static str {
        "title"
    }

    fn apply(&self, doc: &mut Document) {
        doc.title = Some(resolve_title(
            &doc.frontmatter,
            &doc.text,
            doc.source.as_deref(),
            self.source,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_frontmatter_stage() {
        let mut doc = Document::new("---\ntitle: T\ntags: a, b\n---\nBody", None);
        FrontmatterStage.apply(&mut doc);
        assert_eq!(doc.text, "Body");
        assert_eq!(doc.frontmatter.title.as_deref(), Some("T"));
        assert_eq!(doc.frontmatter.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_structure_stage_respects_switches() {
        let text = "Body\n\n---\nNext: [[Two]]\n---\n\n## Connections\n- [[A]]";
        let stage = StructureStage {
            strip_navigation: false,
            sections: vec!["Connections".to_string()],
        };
        let mut doc = Document::new(text, None);
        stage.apply(&mut doc);
        assert!(doc.text.contains("Next: [[Two]]"));
        assert!(!doc.text.contains("Connections"));
    }

    #[test]
    fn test_code_fence_stage_freezes_content() {
        let mut doc = Document::new("```\n> [!note] x\n[[link]]\n```\n", None);
        CodeFenceStage::default().apply(&mut doc);
        assert_eq!(doc.stash.len(), 1);
        assert!(!doc.text.contains("[[link]]"));
    }

    #[test]
    fn test_embed_stage_collects_and_resolves() {
        let stage = EmbedStage {
            resolver: Some(Arc::new(|r: &str| Some(format!("images/{r}")))),
        };
        let mut doc = Document::new("![[a.png]] ![[Note]]", None);
        stage.apply(&mut doc);
        assert_eq!(doc.images, vec!["a.png"]);
        assert!(doc.text.starts_with("<img src=\"images/a.png\""));
    }

    #[test]
    fn test_wikilink_stage_uses_source_stem() {
        let mut doc = Document::new("[[#Setup]] [[Other]]", Some(PathBuf::from("dir/guide.md")));
        WikilinkStage::default().apply(&mut doc);
        assert_eq!(doc.text, "guide > Setup Other");
        assert_eq!(doc.links, vec!["Other"]);
    }

    #[test]
    fn test_render_and_title_stages() {
        let mut doc = Document::new("# Heading\n\ntext", None);
        RenderStage.apply(&mut doc);
        TitleStage::default().apply(&mut doc);
        assert_eq!(doc.html.as_deref(), Some("<h1 id=\"heading\">Heading</h1>\n<p>text</p>\n"));
        assert_eq!(doc.title.as_deref(), Some("Heading"));
    }
}
