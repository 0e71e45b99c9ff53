//! CLI argument definitions using clap.

use crate::config::Config;
use crate::types::{TitleSource, WikilinkMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultpress")]
#[command(author, version, about = "Convert Obsidian-style notes into portable HTML fragments", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/vaultpress/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert notes to HTML fragments
    Convert(ConvertArgs),

    /// List the tagged notes in a folder in chapter order
    Chapters(ChaptersArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Markdown files to convert
    pub files: Vec<PathBuf>,

    /// Write <stem>.html fragments here instead of printing the HTML
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// How wikilinks are rendered
    #[arg(long, value_enum)]
    pub wikilinks: Option<WikilinkMode>,

    /// Where chapter titles come from
    #[arg(long, value_enum)]
    pub title_source: Option<TitleSource>,

    /// Syntect theme for code blocks
    #[arg(long)]
    pub code_style: Option<String>,

    /// Leave fenced code unhighlighted
    #[arg(long)]
    pub no_highlight: bool,

    /// Keep Prev/Next navigation blocks
    #[arg(long)]
    pub keep_navigation: bool,

    /// Level-2 section to strip (repeatable; replaces the configured list)
    #[arg(long = "strip-section")]
    pub strip_sections: Vec<String>,

    /// Point image sources at images/<safe-name> instead of the raw reference
    #[arg(long)]
    pub asset_placeholders: bool,
}

impl ConvertArgs {
    /// Layer the flags that were given over `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.wikilinks {
            config.wikilink_mode = mode;
        }
        if let Some(source) = self.title_source {
            config.title_source = source;
        }
        if let Some(ref style) = self.code_style {
            config.code_style = style.clone();
        }
        if self.no_highlight {
            config.highlight_code = false;
        }
        if self.keep_navigation {
            config.strip_navigation = false;
        }
        if !self.strip_sections.is_empty() {
            config.strip_sections = self.strip_sections.clone();
        }
    }
}

#[derive(Args, Debug)]
pub struct ChaptersArgs {
    /// Folder containing the notes
    pub folder: PathBuf,

    /// Frontmatter tag that marks a note as a chapter
    #[arg(long, default_value = "4epub")]
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_only_given_flags() {
        let cli = Cli::parse_from([
            "vaultpress",
            "convert",
            "a.md",
            "--wikilinks",
            "styled",
            "--strip-section",
            "See Also",
            "--no-highlight",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.wikilink_mode, WikilinkMode::Styled);
        assert_eq!(config.strip_sections, vec!["See Also"]);
        assert!(!config.highlight_code);
        assert!(config.strip_navigation);
        assert_eq!(config.title_source, TitleSource::Auto);
    }

    #[test]
    fn test_output_format_flags() {
        let cli = Cli::parse_from(["vaultpress", "--yaml", "chapters", "notes"]);
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        let cli = Cli::parse_from(["vaultpress", "chapters", "notes", "-vv"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }
}
