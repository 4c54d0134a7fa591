//! Href derivation and ordered route rewrite rules.

use crate::config::HtmlRoutes;
use crate::models::ContentFile;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A route rule as written in pagedex.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteRuleConfig {
    /// Exact file name match, e.g. `_index.md` -> `/`
    FileName { file_name: String, href: String },
    /// Regex over the source path; `rewrite` may use `$1`-style captures
    Pattern { pattern: String, rewrite: String },
}

impl RouteRuleConfig {
    /// Built-in rules: section landing pages, then flattened `page/` content.
    pub fn defaults(prefix: &str) -> Vec<Self> {
        let page_root = if prefix.is_empty() {
            String::from("^page/")
        } else {
            format!("^{}/page/", regex::escape(prefix.trim_end_matches('/')))
        };
        vec![
            RouteRuleConfig::FileName {
                file_name: "_index.md".to_string(),
                href: "/".to_string(),
            },
            RouteRuleConfig::Pattern {
                pattern: format!(r"{}(.+)\.md$", page_root),
                rewrite: "/$1".to_string(),
            },
        ]
    }
}

#[derive(Debug, Clone)]
enum RouteRule {
    FileName { file_name: String, href: String },
    Pattern { pattern: Regex, rewrite: String },
}

impl RouteRule {
    fn apply(&self, file: &ContentFile, source_path: &str) -> Option<String> {
        match self {
            RouteRule::FileName { file_name, href } => {
                (file.file_name == *file_name).then(|| href.clone())
            }
            RouteRule::Pattern { pattern, rewrite } => {
                let caps = pattern.captures(source_path)?;
                let mut out = String::new();
                caps.expand(rewrite, &mut out);
                Some(out)
            }
        }
    }
}

/// Ordered rewrite rules for markdown hrefs; first match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: &[RouteRuleConfig]) -> Result<Self, RouteError> {
        let rules = rules
            .iter()
            .map(|rule| match rule {
                RouteRuleConfig::FileName { file_name, href } => Ok(RouteRule::FileName {
                    file_name: file_name.clone(),
                    href: href.clone(),
                }),
                RouteRuleConfig::Pattern { pattern, rewrite } => Regex::new(pattern)
                    .map(|re| RouteRule::Pattern {
                        pattern: re,
                        rewrite: rewrite.clone(),
                    })
                    .map_err(|source| RouteError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// First rule rewrite that applies to this file, if any
    pub fn resolve(&self, file: &ContentFile) -> Option<String> {
        let source_path = file.source_path();
        self.rules
            .iter()
            .find_map(|rule| rule.apply(file, &source_path))
    }

    /// Href for a markdown page: prefix and `.md` removed, rules applied, lowercased
    pub fn markdown_href(&self, file: &ContentFile) -> String {
        let href = self.resolve(file).unwrap_or_else(|| {
            let rooted = file.rooted_path();
            rooted
                .strip_suffix(".md")
                .map(str::to_string)
                .unwrap_or(rooted)
        });
        href.to_lowercase()
    }
}

/// Href for a raw HTML page under the given policy
pub fn html_href(file: &ContentFile, policy: HtmlRoutes) -> String {
    let rooted = file.rooted_path();
    match policy {
        HtmlRoutes::Preserve => rooted,
        HtmlRoutes::Normalize => rooted
            .strip_suffix(".html")
            .unwrap_or(&rooted)
            .to_lowercase(),
    }
}
