//! Search command implementation
use anyhow::{Context, Result};
use pagedex_core::{search, PageIndex, SearchHit, SearchOptions};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SearchCommandOptions {
    pub limit: usize,
    pub tags: Vec<String>,
    pub json: bool,
}

#[derive(Serialize)]
struct SearchResult<'a> {
    title: &'a str,
    href: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    snippet: String,
    score: f32,
}

#[derive(Serialize)]
struct SearchData<'a> {
    query: &'a str,
    limit: usize,
    total: usize,
    results: Vec<SearchResult<'a>>,
}

/// Search the written index
pub fn search_index(
    config_path: Option<&Path>,
    query: &str,
    opts: SearchCommandOptions,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let index_path = config.output_path();

    if !index_path.exists() {
        anyhow::bail!(
            "Search index not found at {:?}. Run `pagedex build` first.",
            index_path
        );
    }

    let index_json = fs::read_to_string(&index_path).context("Failed to read search index")?;
    let index: PageIndex =
        serde_json::from_str(&index_json).context("Failed to parse search index")?;

    let hits = search(
        &index.records,
        query,
        &SearchOptions {
            tags: opts.tags.clone(),
        },
    );

    if opts.json {
        let payload = SearchData {
            query,
            limit: opts.limit,
            total: hits.len(),
            results: hits.iter().take(opts.limit).map(to_result).collect(),
        };
        let json = serde_json::to_string_pretty(&payload)?;
        println!("{json}");
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("\n🔍 Found {} results for '{}':\n", hits.len(), query);
    for hit in hits.iter().take(opts.limit) {
        print_search_result(hit);
    }
    if hits.len() > opts.limit {
        println!("\n  ... and {} more results", hits.len() - opts.limit);
    }

    Ok(())
}

fn to_result<'a>(hit: &SearchHit<'a>) -> SearchResult<'a> {
    SearchResult {
        title: &hit.record.title,
        href: &hit.record.href,
        tags: hit.record.tags.as_deref(),
        snippet: create_snippet(&hit.record.content, 200),
        score: hit.score,
    }
}

fn print_search_result(hit: &SearchHit<'_>) {
    let title = if hit.record.title.is_empty() {
        "(untitled)"
    } else {
        hit.record.title.as_str()
    };
    println!("{}", title);
    println!("  {}", hit.record.href);
    println!("  {}", create_snippet(&hit.record.content, 200));
    println!();
}

fn create_snippet(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    // Find last space within limit
    let truncated: String = chars[..max_chars].iter().collect();
    if let Some(last_space) = truncated.rfind(' ') {
        format!("{}...", &truncated[..last_space])
    } else {
        format!("{}...", truncated)
    }
}
