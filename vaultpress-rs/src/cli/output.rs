//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render a serializable value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => toml::to_string_pretty(value)?,
        })
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print a message to stderr if not in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: usize,
    }

    #[test]
    fn test_render_formats() {
        let sample = Sample { name: "a", count: 2 };
        let json = Output::new(OutputFormat::Json, false).render(&sample).unwrap();
        assert!(json.contains("\"name\": \"a\""));
        let yaml = Output::new(OutputFormat::Yaml, false).render(&sample).unwrap();
        assert!(yaml.contains("count: 2"));
        let toml = Output::new(OutputFormat::Toml, true).render(&sample).unwrap();
        assert!(toml.contains("name = \"a\""));
    }
}
