use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, contents: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn pagedex() -> Result<Command, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let cmd = Command::cargo_bin("pagedex")?;
    Ok(cmd)
}

#[test]
fn build_without_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(
        dir.path(),
        "content/post/hello.md",
        "---\ntitle: Hello World\ntags: [intro, test]\n---\nSome **body** text.\n",
    )?;
    write(dir.path(), "content/_index.md", "---\ntitle: Home\n---\n")?;
    write(dir.path(), "content/post/.DS_Store", "junk")?;

    pagedex()?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("static/js/lunr/index.json"))?;
    let value: Value = serde_json::from_str(&written)?;
    let arr = value.as_array().expect("json array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["href"], "/");
    assert_eq!(
        arr[1],
        serde_json::json!({
            "title": "Hello World",
            "tags": ["intro", "test"],
            "href": "/post/hello",
            "content": "Some body text"
        })
    );

    Ok(())
}

#[test]
fn build_honors_config_and_overrides() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(
        dir.path(),
        "site.yml",
        "paths:\n  content: pages\n  output: out/index.json\ncontent_prefix: pages\nhtml_routes: normalize\n",
    )?;
    write(dir.path(), "pages/About.html", "<p>About us.</p>")?;
    write(dir.path(), "elsewhere/Team.html", "<p>Team.</p>")?;

    pagedex()?
        .current_dir(dir.path())
        .args(["--config", "site.yml", "build"])
        .assert()
        .success();
    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/index.json"))?)?;
    assert_eq!(written[0]["href"], "/about");
    assert_eq!(written[0]["title"], "About");
    assert!(written[0].get("tags").is_none());

    pagedex()?
        .current_dir(dir.path())
        .args([
            "--config",
            "site.yml",
            "build",
            "--content",
            "elsewhere",
            "--output",
            "alt.json",
            "--pretty",
        ])
        .assert()
        .success();
    let alt = fs::read_to_string(dir.path().join("alt.json"))?;
    assert!(alt.starts_with("[\n"));
    let alt: Value = serde_json::from_str(&alt)?;
    assert_eq!(alt[0]["href"], "/team");

    Ok(())
}

#[test]
fn build_fails_without_content_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    pagedex()?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Content directory not found"));

    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    pagedex()?
        .current_dir(dir.path())
        .args(["--config", "nope.yml", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));

    Ok(())
}

#[test]
fn verify_reports_diagnostics() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "content/ok.md", "---\ntitle: Fine\n---\nok\n")?;
    write(dir.path(), "content/bad.md", "---\ntitle: [oops\n---\nbody\n")?;
    fs::write(dir.path().join("content/raw.md"), [0xffu8, 0xfe])?;

    let assert = pagedex()?
        .current_dir(dir.path())
        .args(["verify", "--json"])
        .assert()
        .success();
    let summary: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(summary["pages"], 2);
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["errors"], 1);
    assert_eq!(summary["warnings"], 1);
    assert!(!dir.path().join("static/js/lunr/index.json").exists());

    pagedex()?
        .current_dir(dir.path())
        .args(["verify", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("frontmatter.invalid"));

    Ok(())
}

#[test]
fn init_scaffolds_a_buildable_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    pagedex()?.arg("init").arg(dir.path()).assert().success();
    assert!(dir.path().join("pagedex.yml").exists());

    pagedex()?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();
    let written: Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join("static/js/lunr/index.json"),
    )?)?;
    assert_eq!(written[0]["title"], "Home");
    assert_eq!(written[0]["href"], "/");

    Ok(())
}
