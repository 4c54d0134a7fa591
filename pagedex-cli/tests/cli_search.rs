use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const INDEX: &str = r#"[
  {"title":"Rust Guide","tags":["rust","guide"],"href":"/rust","content":"Ownership and borrowing"},
  {"title":"about","href":"/about.html","content":"We write Rust at work"},
  {"title":"Cooking","tags":["food"],"href":"/cooking","content":"Bread"}
]"#;

fn site_with_index() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("static/js/lunr");
    fs::create_dir_all(&out)?;
    fs::write(out.join("index.json"), INDEX)?;
    Ok(dir)
}

#[test]
fn search_json_ranks_title_hits_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = site_with_index()?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("pagedex")?
        .current_dir(dir.path())
        .args(["search", "rust", "--json", "--limit", "1"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["total"], 2);
    let results = value["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["href"], "/rust");
    assert_eq!(results[0]["tags"][0], "rust");

    Ok(())
}

#[test]
fn search_text_with_tag_filter() -> Result<(), Box<dyn std::error::Error>> {
    let dir = site_with_index()?;

    #[allow(deprecated)]
    Command::cargo_bin("pagedex")?
        .current_dir(dir.path())
        .args(["search", "bread", "--tags", "food,other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/cooking"))
        .stdout(predicate::str::contains("Found 1 results"));

    Ok(())
}

#[test]
fn search_without_index_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("pagedex")?
        .current_dir(dir.path())
        .args(["search", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run `pagedex build` first"));

    Ok(())
}
