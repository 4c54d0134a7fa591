//! Frontmatter splitting and parsing for markdown files.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Frontmatter fields the indexer cares about. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,
}

/// Where the frontmatter block stands in a markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// The document does not open with a `---` line
    Absent,
    /// An opening `---` line without a closing one
    Unterminated,
    /// Raw YAML between the opening and closing delimiters
    Present(&'a str),
}

/// A markdown document split into its frontmatter block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    pub block: Block<'a>,
    pub body: &'a str,
}

const DELIMITER: &str = "---";

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split a markdown document on its first two standalone `---` lines.
///
/// Only the opening line and the first following delimiter line count;
/// later `---` lines (thematic breaks, tables) belong to the body. When no
/// complete block is found the whole document is the body.
///
/// # Example
///
/// ```
/// use pagedex_core::frontmatter::{split_document, Block};
///
/// let doc = split_document("---\ntitle: Hi\n---\nbody\n---\nmore\n");
/// assert_eq!(doc.block, Block::Present("title: Hi\n"));
/// assert_eq!(doc.body, "body\n---\nmore\n");
/// ```
pub fn split_document(content: &str) -> Document<'_> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Document {
            block: Block::Absent,
            body: text,
        };
    };
    if !is_delimiter(first) {
        return Document {
            block: Block::Absent,
            body: text,
        };
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            return Document {
                block: Block::Present(&text[yaml_start..offset]),
                body: &text[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    Document {
        block: Block::Unterminated,
        body: text,
    }
}

/// Parse a raw YAML frontmatter block. A blank block is empty frontmatter.
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// `title: 1984` is a number to YAML but a title to us.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::Sequence(items) => {
            items.into_iter().filter_map(scalar_to_string).collect()
        }
        other => scalar_to_string(other).into_iter().collect(),
    })
}
