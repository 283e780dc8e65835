use std::path::Path;
use std::process::{Command, Output};

use tempfile::{TempDir, tempdir};

fn postfix_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_url-postfix"));
    cmd.current_dir(cwd);
    cmd
}

/// A small site: `index.html` at the root, a worker page in `worker/`.
fn site() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("app.js"), "console.log('app');\n").unwrap();
    std::fs::write(root.join("style.css"), "body { margin: 0; }\n").unwrap();
    std::fs::create_dir_all(root.join("worker")).unwrap();
    std::fs::write(root.join("worker/work.js"), "onmessage = () => {};\n").unwrap();
    std::fs::write(
        root.join("index.html"),
        "<html>\n<head>\n  <link rel=\"stylesheet\" href=\"style.css\">\n  <script src=\"https://cdn.example.com/lib.js\"></script>\n  <script defer src=\"/app.js\"></script>\n</head>\n</html>\n",
    )
    .unwrap();
    std::fs::write(
        root.join("worker/index.html"),
        "<script>const w = new Worker('./work.js');</script>\n",
    )
    .unwrap();
    return dir;
}

fn stderr(output: &Output) -> String {
    return String::from_utf8_lossy(&output.stderr).into_owned();
}

#[test]
fn check_after_rewrite_is_fresh() {
    let dir = site();
    let rewrite = postfix_cmd(dir.path())
        .args(["-d", ".", "-f", "index.html", "-f", "worker/index.html"])
        .output()
        .unwrap();
    assert!(rewrite.status.success(), "rewrite failed: {}", stderr(&rewrite));

    let worker = std::fs::read_to_string(dir.path().join("worker/index.html")).unwrap();
    assert!(worker.starts_with("<script>const w = new Worker('./work.js?"));

    let check = postfix_cmd(dir.path())
        .args(["--check", "-d", ".", "-f", "index.html", "-f", "worker/index.html"])
        .output()
        .unwrap();
    assert_eq!(check.status.code(), Some(0), "check failed: {}", stderr(&check));
}

#[test]
fn check_flags_stale_references_and_writes_nothing() {
    let dir = site();
    let before = std::fs::read_to_string(dir.path().join("index.html")).unwrap();

    let check = postfix_cmd(dir.path())
        .args(["--check", "--base-dir", ".", "--file", "index.html"])
        .output()
        .unwrap();

    assert_eq!(check.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&check.stdout);
    assert!(stdout.contains("STALE   index.html: /app.js -> /app.js?"));
    assert!(stdout.contains("2 stale"));
    assert_eq!(std::fs::read_to_string(dir.path().join("index.html")).unwrap(), before);
}

#[test]
fn config_file_supplies_targets() {
    let dir = site();
    std::fs::write(dir.path().join(".postfix.toml"), "files = [\"index.html\"]\n").unwrap();

    let output = postfix_cmd(dir.path()).args(["-d", "."]).output().unwrap();
    assert!(output.status.success(), "rewrite failed: {}", stderr(&output));

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("href=\"style.css?"));
}

#[test]
fn json_format_lists_references() {
    let dir = site();
    let output = postfix_cmd(dir.path())
        .args(["--check", "--format", "json", "-d", ".", "-f", "index.html"])
        .output()
        .unwrap();

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &reports[0];
    assert_eq!(report["references"].as_array().unwrap().len(), 2);
    assert_eq!(report["passthrough"][0]["path"], "https://cdn.example.com/lib.js");
}

#[test]
fn missing_reference_aborts_without_writing() {
    let dir = site();
    let html = "<script src=\"/app.js\"></script>\n<script src=\"/gone.js\"></script>\n";
    std::fs::write(dir.path().join("index.html"), html).unwrap();

    let output = postfix_cmd(dir.path())
        .args(["-d", ".", "-f", "index.html"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Referenced File Unreadable"));
    assert_eq!(std::fs::read_to_string(dir.path().join("index.html")).unwrap(), html);
}

#[test]
fn missing_target_document_fails() {
    let dir = site();
    let output = postfix_cmd(dir.path())
        .args(["-d", ".", "-f", "nope.html"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Document Unreadable"));
}

#[test]
fn rewrites_in_place_and_keeps_external_references() {
    let dir = site();
    let output = postfix_cmd(dir.path())
        .args(["--base_dir", ".", "--file", "index.html"])
        .output()
        .unwrap();
    assert!(output.status.success(), "rewrite failed: {}", stderr(&output));

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("<script src=\"https://cdn.example.com/lib.js\"></script>"));

    let lines: Vec<&str> = html.lines().collect();
    let script = lines.iter().find(|l| l.contains("/app.js")).unwrap();
    let postfix = script
        .trim()
        .strip_prefix("<script defer src=\"/app.js?")
        .and_then(|rest| rest.strip_suffix("\"></script>"))
        .unwrap();
    assert_eq!(postfix.len(), 8);
    assert!(postfix.chars().all(|c| c.is_ascii_hexdigit()));
}
