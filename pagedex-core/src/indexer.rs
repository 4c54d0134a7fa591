//! Index building: discover content files, turn each into a record, write the JSON.

use crate::{
    config::Config,
    frontmatter::{parse_frontmatter, split_document, Block, Frontmatter},
    models::*,
    routes::{html_href, RouteError, RouteTable},
    sanitize::plain_text,
};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// macOS folder metadata; never content
const DS_STORE: &str = ".DS_Store";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Content directory not found: {0:?}")]
    MissingContentDir(PathBuf),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Failed to write index {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of transforming a single file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// None when the file is deliberately left out (drafts)
    pub record: Option<PageRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a page index from a content directory
pub struct PageIndexer {
    config: Config,
    routes: RouteTable,
    ignores: Vec<Regex>,
}

impl PageIndexer {
    pub fn new(config: Config) -> Result<Self, IndexError> {
        let routes = RouteTable::new(&config.route_rules())?;
        let ignores = compile_ignore_patterns(&config.ignore_patterns);
        Ok(Self {
            config,
            routes,
            ignores,
        })
    }

    /// Index every file under the content directory
    pub fn build(&self) -> Result<IndexReport, IndexError> {
        let (files, mut report) = self.discover()?;

        tracing::info!("Found {} content files", files.len());

        for file in &files {
            let source_path = file.source_path();
            let raw = match fs::read_to_string(&file.path) {
                Ok(raw) => raw,
                Err(err) => {
                    let diag = Diagnostic::error(
                        "file.read",
                        format!("Failed to read {:?}: {}", file.path, err),
                        Some(source_path),
                    );
                    diag.log();
                    report.diagnostics.push(diag);
                    report.skipped += 1;
                    continue;
                }
            };

            let transformed = self.transform(file, &raw);
            for diag in &transformed.diagnostics {
                diag.log();
            }
            report.diagnostics.extend(transformed.diagnostics);

            match transformed.record {
                Some(record) => {
                    if file.kind() == SourceKind::Markdown {
                        log_record(&record);
                    }
                    report.index.push(record);
                }
                None => {
                    tracing::debug!("Skipping draft {}", source_path);
                    report.skipped += 1;
                }
            }
        }

        let mut duplicates = duplicate_href_diagnostics(&report.index);
        for diag in &duplicates {
            diag.log();
        }
        report.diagnostics.append(&mut duplicates);

        tracing::info!(
            "Indexed {} pages ({} skipped, {} diagnostics)",
            report.index.len(),
            report.skipped,
            report.diagnostics.len()
        );

        Ok(report)
    }

    /// Walk the content directory in file-name order.
    ///
    /// Returns the files to index and a report seeded with walk diagnostics
    /// and the count of files skipped up front.
    pub fn discover(&self) -> Result<(Vec<ContentFile>, IndexReport), IndexError> {
        let content_dir = self.config.content_dir();
        if !content_dir.is_dir() {
            return Err(IndexError::MissingContentDir(content_dir));
        }

        let mut files = Vec::new();
        let mut report = IndexReport::default();

        // Symlinked files and directories are indexed under their link path;
        // loops surface as walk.error diagnostics
        for entry in WalkDir::new(&content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let diag = Diagnostic::warning(
                        "walk.error",
                        format!("Failed to read directory entry: {}", err),
                        err.path().map(|p| p.to_string_lossy().to_string()),
                    );
                    diag.log();
                    report.diagnostics.push(diag);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = relative_path(&content_dir, entry.path());
            if entry.file_name() == DS_STORE {
                tracing::debug!("Skipping {}", rel);
                report.skipped += 1;
                continue;
            }
            if should_ignore(&rel, &self.ignores) {
                tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                report.skipped += 1;
                continue;
            }

            files.push(ContentFile::new(
                entry.path(),
                rel,
                self.config.content_prefix.clone(),
            ));
        }

        Ok((files, report))
    }

    /// Turn a file's contents into a record. Performs no I/O and no logging.
    pub fn transform(&self, file: &ContentFile, raw: &str) -> Transformed {
        match file.kind() {
            SourceKind::Html => Transformed {
                record: Some(self.html_record(file, raw)),
                diagnostics: Vec::new(),
            },
            SourceKind::Markdown => self.markdown_record(file, raw),
        }
    }

    fn html_record(&self, file: &ContentFile, raw: &str) -> PageRecord {
        let title = file
            .file_name
            .strip_suffix(".html")
            .unwrap_or(&file.file_name)
            .to_string();

        PageRecord {
            title,
            tags: None,
            href: html_href(file, self.config.html_routes),
            content: plain_text(raw.trim()),
        }
    }

    fn markdown_record(&self, file: &ContentFile, raw: &str) -> Transformed {
        let source_path = file.source_path();
        let mut diagnostics = Vec::new();
        let document = split_document(raw);

        let frontmatter = match document.block {
            Block::Present(yaml) => match parse_frontmatter(yaml) {
                Ok(fm) => fm,
                Err(err) => {
                    diagnostics.push(Diagnostic::warning(
                        "frontmatter.invalid",
                        format!("Ignoring frontmatter: {}", err),
                        Some(source_path.clone()),
                    ));
                    Frontmatter::default()
                }
            },
            Block::Unterminated => {
                diagnostics.push(Diagnostic::warning(
                    "frontmatter.unterminated",
                    "Frontmatter has no closing '---' line; indexing the whole file as body",
                    Some(source_path.clone()),
                ));
                Frontmatter::default()
            }
            Block::Absent => {
                diagnostics.push(Diagnostic::info(
                    "frontmatter.missing",
                    "No frontmatter; title and tags left empty",
                    Some(source_path.clone()),
                ));
                Frontmatter::default()
            }
        };

        if frontmatter.draft && self.config.skip_drafts {
            return Transformed {
                record: None,
                diagnostics,
            };
        }

        let record = PageRecord {
            title: frontmatter.title.unwrap_or_default(),
            tags: Some(frontmatter.tags),
            href: self.routes.markdown_href(file),
            content: plain_text(document.body),
        };

        Transformed {
            record: Some(record),
            diagnostics,
        }
    }
}

/// Serialize the index to `path`, creating parent directories.
pub fn write_index(index: &PageIndex, path: &Path, pretty: bool) -> Result<(), IndexError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IndexError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(index)?
    } else {
        serde_json::to_string(index)?
    };

    fs::write(path, json).map_err(|source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} records to {:?}", index.len(), path);
    Ok(())
}

fn log_record(record: &PageRecord) {
    match serde_json::to_string(record) {
        Ok(json) => tracing::debug!(target: "pagedex::record", "{}", json),
        Err(err) => tracing::debug!("Could not serialize record {}: {}", record.href, err),
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

fn duplicate_href_diagnostics(index: &PageIndex) -> Vec<Diagnostic> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &index.records {
        *counts.entry(record.href.as_str()).or_default() += 1;
    }

    // Report in index order, once per href
    let mut diagnostics = Vec::new();
    for record in &index.records {
        if let Some(count) = counts.remove(record.href.as_str()) {
            if count > 1 {
                diagnostics.push(Diagnostic::warning(
                    "route.duplicate",
                    format!("{} pages share the href {}", count, record.href),
                    None,
                ));
            }
        }
    }
    diagnostics
}
