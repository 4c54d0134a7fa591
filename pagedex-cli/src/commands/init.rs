//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../pagedex.yml.example");

/// Initialize a new pagedex project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ pagedex initialized in {:?}", root);
    println!("  - Edit pagedex.yml to change paths and routes");
    println!("  - Run `pagedex build` to write the search index");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join(super::DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        println!("{} already exists at {:?}", super::DEFAULT_CONFIG_FILE, config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let content = root.join("content");
    fs::create_dir_all(&content).with_context(|| format!("Failed to create {:?}", content))?;

    let landing = content.join("_index.md");
    if !landing.exists() {
        fs::write(&landing, sample_page())
            .with_context(|| format!("Failed to write {:?}", landing))?;
        println!("Created {:?}", landing);
    }

    Ok(())
}

fn sample_page() -> &'static str {
    r#"---
title: Home
tags: [welcome]
---

Pages under content/ are indexed by `pagedex build`. Markdown pages need a
front matter block with a title; raw .html pages are titled by file name.
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagedex_core::Config;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_yaml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.content_prefix, "content");
        assert!(config.routes.is_none());
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        init_project(Some(dir.path())).unwrap();
        fs::write(dir.path().join("content/_index.md"), "custom").unwrap();
        init_project(Some(dir.path())).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("content/_index.md")).unwrap(),
            "custom"
        );
        assert!(dir.path().join("pagedex.yml").exists());
    }
}
