//! Scored lookups over a written page index.

use crate::models::PageRecord;
use std::collections::HashSet;

const TITLE_WEIGHT: f32 = 10.0;
const TAG_WEIGHT: f32 = 3.0;
const CONTENT_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Keep only records carrying at least one of these tags
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a PageRecord,
    pub score: f32,
}

/// Rank records against a whitespace-separated query.
///
/// Each term scores independently: title hits weigh most, then tags, then
/// content. Records with no hits are dropped; ties keep index order.
pub fn search<'a>(
    records: &'a [PageRecord],
    query: &str,
    opts: &SearchOptions,
) -> Vec<SearchHit<'a>> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }
    let tag_filter: HashSet<String> = opts.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut hits: Vec<SearchHit<'a>> = records
        .iter()
        .filter_map(|record| {
            let tags: Vec<String> = record
                .tags
                .iter()
                .flatten()
                .map(|t| t.to_lowercase())
                .collect();

            if !tag_filter.is_empty() && !tags.iter().any(|t| tag_filter.contains(t)) {
                return None;
            }

            let title = record.title.to_lowercase();
            let content = record.content.to_lowercase();

            let mut score = 0.0;
            for term in &terms {
                if title.contains(term.as_str()) {
                    score += TITLE_WEIGHT;
                }
                if tags.iter().any(|t| t.contains(term.as_str())) {
                    score += TAG_WEIGHT;
                }
                if content.contains(term.as_str()) {
                    score += CONTENT_WEIGHT;
                }
            }

            (score > 0.0).then_some(SearchHit { record, score })
        })
        .collect();

    // Stable sort keeps index order among equal scores
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}
