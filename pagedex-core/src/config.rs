//! Configuration parsing and management.

use crate::routes::RouteRuleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the pagedex.yml schema.
///
/// Every key is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    /// Leading path segment removed from source paths when deriving hrefs
    #[serde(default = "default_content_prefix")]
    pub content_prefix: String,

    /// Regexes matched against paths relative to the content root
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Ordered href rewrite rules for markdown pages (None means built-in rules)
    #[serde(default)]
    pub routes: Option<Vec<RouteRuleConfig>>,

    #[serde(default)]
    pub html_routes: HtmlRoutes,

    #[serde(default)]
    pub skip_drafts: bool,

    #[serde(default)]
    pub pretty: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_content_prefix() -> String {
    String::from("content")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_output_path")]
    pub output: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("static/js/lunr/index.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content_dir(),
            output: default_output_path(),
        }
    }
}

/// How hrefs for raw HTML pages are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlRoutes {
    /// Keep the `.html` extension and the original case
    #[default]
    Preserve,
    /// Strip `.html` and lowercase, like markdown routes
    Normalize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            content_prefix: default_content_prefix(),
            ignore_patterns: Vec::new(),
            routes: None,
            html_routes: HtmlRoutes::default(),
            skip_drafts: false,
            pretty: false,
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text. Paths stay relative to the working directory.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}; using defaults", path);
            Ok(Self::default())
        }
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the index output file, resolved relative to config file
    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Route rules in effect: the configured list, or the built-in defaults
    pub fn route_rules(&self) -> Vec<RouteRuleConfig> {
        match &self.routes {
            Some(rules) => rules.clone(),
            None => RouteRuleConfig::defaults(&self.content_prefix),
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            match config_path.parent() {
                Some(parent) => parent.join(path),
                None => path.to_path_buf(),
            }
        } else {
            path.to_path_buf()
        }
    }
}
