//! Content model structs for source files, index records, and diagnostics.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a content file is turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Markdown,
}

impl SourceKind {
    /// Anything that is not `.html` is treated as markdown.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".html") {
            SourceKind::Html
        } else {
            SourceKind::Markdown
        }
    }
}

/// A file discovered under the content root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Location on disk
    pub path: PathBuf,

    /// Final path component (e.g., "_index.md")
    pub file_name: String,

    /// Path relative to the content root, always `/`-separated
    pub relative_path: String,

    /// Content prefix this file is reported under (e.g., "content")
    pub prefix: String,
}

impl ContentFile {
    pub fn new(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        let relative_path = relative_path.into();
        let file_name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path.as_str())
            .to_string();
        Self {
            path: path.into(),
            file_name,
            relative_path,
            prefix: prefix.into(),
        }
    }

    /// Path as route patterns see it: "content/post/hello.md"
    pub fn source_path(&self) -> String {
        if self.prefix.is_empty() {
            self.relative_path.clone()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), self.relative_path)
        }
    }

    /// Source path with the content prefix removed: "/post/hello.md"
    pub fn rooted_path(&self) -> String {
        format!("/{}", self.relative_path)
    }

    pub fn kind(&self) -> SourceKind {
        SourceKind::from_file_name(&self.file_name)
    }
}

/// One searchable page in the output index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,

    /// Only markdown-derived records carry tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    pub href: String,

    pub content: String,
}

/// Ordered list of records, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex {
    pub records: Vec<PageRecord>,
}

impl PageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PageRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_href(&self, href: &str) -> Option<&PageRecord> {
        self.records.iter().find(|r| r.href == href)
    }
}

/// Severity levels for indexing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A structured diagnostic emitted while indexing content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl Diagnostic {
    pub fn new(
        code: &str,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        source_path: Option<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
            source_path,
        }
    }

    pub fn error(code: &str, message: impl Into<String>, source_path: Option<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Error, message, source_path)
    }

    pub fn warning(code: &str, message: impl Into<String>, source_path: Option<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Warning, message, source_path)
    }

    pub fn info(code: &str, message: impl Into<String>, source_path: Option<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Info, message, source_path)
    }

    /// Log through tracing at the level matching the severity
    pub fn log(&self) {
        let source = self.source_path.as_deref().unwrap_or("-");
        match self.severity {
            DiagnosticSeverity::Error => {
                tracing::error!(code = %self.code, source, "{}", self.message)
            }
            DiagnosticSeverity::Warning => {
                tracing::warn!(code = %self.code, source, "{}", self.message)
            }
            DiagnosticSeverity::Info => {
                tracing::debug!(code = %self.code, source, "{}", self.message)
            }
        }
    }
}

/// Result of one indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexReport {
    pub index: PageIndex,
    pub diagnostics: Vec<Diagnostic>,
    /// Files that produced no record (ignored, drafts, unreadable)
    pub skipped: usize,
}

impl IndexReport {
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticSeverity::Error) > 0
    }
}
