//! # pagedex-core
//!
//! Core library for building static-site search indexes.
//!
//! Walks a content directory of markdown and HTML pages, derives a title,
//! href, tags and plain-text content for each, and serializes the records
//! as a JSON array for client-side search.

pub mod config;
pub mod frontmatter;
pub mod indexer;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod search;

pub use config::{Config, HtmlRoutes};
pub use frontmatter::Frontmatter;
pub use indexer::{write_index, IndexError, PageIndexer, Transformed};
pub use models::{
    ContentFile, Diagnostic, DiagnosticSeverity, IndexReport, PageIndex, PageRecord, SourceKind,
};
pub use routes::{RouteRuleConfig, RouteTable};
pub use search::{search, SearchHit, SearchOptions};
