//! YAML frontmatter parsing.
//!
//! Malformed metadata never fails a note: anything that does not parse as a
//! YAML mapping is treated as if there were no frontmatter at all.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub content: &'a str,
}

/// Parsed frontmatter with typed accessors for the recognized fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always trimmed, non-empty, in source order.
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
    /// Every key from the block, including the recognized ones.
    pub raw: Mapping,
}

impl Frontmatter {
    /// Whether the note had no (usable) frontmatter.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Look up an arbitrary key in the raw mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Look up a key, falling back to `default` when it is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.raw.get(key).unwrap_or(default)
    }

    /// Look up a key and stringify it if it is a scalar.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    /// Build typed accessors from a parsed mapping.
    pub fn from_mapping(raw: Mapping) -> Self {
        let field = |key: &str| raw.get(key).and_then(scalar_to_string);
        let null = Value::Null;

        // Obsidian accepts either capitalization for list properties
        let either_case = |lower: &str, upper: &str| {
            raw.get(lower)
                .filter(|v| !v.is_null())
                .or_else(|| raw.get(upper))
                .unwrap_or(&null)
        };

        let tags = normalize_list(either_case("tags", "Tags"), split_delimited);
        let aliases_value = either_case("aliases", "Aliases");
        let aliases = normalize_list(aliases_value, |s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        });

        let title = field("title");
        let author = field("author");
        let date = field("date");
        let description = field("description");

        Self {
            title,
            author,
            date,
            description,
            tags,
            aliases,
            raw,
        }
    }
}

/// Stringify scalar YAML values; sequences, mappings and nulls yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Normalize a list-or-string value into trimmed, non-empty strings.
fn normalize_list(value: &Value, split: impl Fn(&str) -> Vec<String>) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split(s),
        other => scalar_to_string(other).map(|s| split(&s)).unwrap_or_default(),
    }
}

/// Split a comma- and/or whitespace-delimited string.
fn split_delimited(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Split content into frontmatter and body.
///
/// The block must open on the very first line and close at the next line that
/// consists of `---` alone (trailing whitespace allowed).
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        content,
    };

    let Some(first_end) = content.find('\n') else {
        return no_frontmatter;
    };
    if !is_fence(&content[..first_end]) {
        return no_frontmatter;
    }

    let yaml_start = first_end + 1;
    let mut line_start = yaml_start;
    while line_start <= content.len() {
        let rest = &content[line_start..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        let line = rest[..line_len].trim_end_matches('\r');

        if is_fence(line) {
            let yaml_end = line_start.saturating_sub(1).max(yaml_start);
            let yaml = content[yaml_start..yaml_end].trim_end_matches('\r');
            let body_start = (line_start + line_len + 1).min(content.len());
            return FrontmatterSplit {
                yaml: Some(yaml),
                content: &content[body_start..],
            };
        }

        if line_len == rest.len() {
            break;
        }
        line_start += line_len + 1;
    }

    no_frontmatter
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Parse the frontmatter block and return it together with the remaining body.
///
/// Returns an empty [`Frontmatter`] and the untouched input when there is no
/// block or the block is not a YAML mapping.
pub fn parse_frontmatter(content: &str) -> (Frontmatter, &str) {
    let split = split_frontmatter(content);
    let Some(yaml) = split.yaml else {
        return (Frontmatter::default(), content);
    };

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => (Frontmatter::from_mapping(mapping), split.content),
        Ok(Value::Null) => (Frontmatter::default(), split.content),
        Ok(_) => {
            tracing::debug!("frontmatter is not a mapping, ignoring");
            (Frontmatter::default(), content)
        }
        Err(e) => {
            tracing::debug!(error = %e, "malformed frontmatter, ignoring");
            (Frontmatter::default(), content)
        }
    }
}
