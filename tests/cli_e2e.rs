//! End-to-end CLI tests for chatview.
//!
//! These tests run the actual binary against exports written to a temporary
//! directory and check the files it produces.
//!
//! # Test Categories
//!
//! - **Basic functionality**: TXT and ZIP exports convert to JSON
//! - **Output formats**: JSON and JSONL generation
//! - **Filters**: Date and sender filtering
//! - **Flags**: Self override, swap, notices, media directory
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// ============================================================================
// Test Fixtures
// ============================================================================

const TRANSCRIPT: &str = "[14/01/2024, 21:00:00] Alice: \u{200E}Messages and calls are end-to-end encrypted.
[14/01/2024, 21:05:00] Alice: Dinner tomorrow?
[15/01/2024, 10:30:00] Bob: Sure!
What time?
[15/01/2024, 10:31:00] Alice: 8pm
[15/01/2024, 10:32:00] Bob: \u{200E}<attached: 00000003-PHOTO-2024-01-15-10-32-00.jpg>
[16/01/2024, 09:00:00] Bob: See you";

/// Creates a temporary directory with a TXT and a ZIP export.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("WhatsApp Chat with Bob.txt"), TRANSCRIPT).unwrap();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("_chat.txt", options).unwrap();
    writer.write_all(TRANSCRIPT.as_bytes()).unwrap();
    writer
        .start_file("00000003-PHOTO-2024-01-15-10-32-00.jpg", options)
        .unwrap();
    writer.write_all(b"\xFF\xD8\xFFfake-jpeg").unwrap();
    writer.start_file("../../evil.jpg", options).unwrap();
    writer.write_all(b"nope").unwrap();
    let data = writer.finish().unwrap().into_inner();
    fs::write(dir.path().join("WhatsApp Chat with Bob.zip"), data).unwrap();

    fs::write(dir.path().join("notes.txt"), "groceries\nmilk\neggs\n").unwrap();
    fs::write(dir.path().join("broken.zip"), b"PK\x03\x04 definitely not a zip").unwrap();

    dir
}

fn chatview() -> Command {
    Command::cargo_bin("chatview").unwrap()
}

fn txt(dir: &TempDir) -> PathBuf {
    dir.path().join("WhatsApp Chat with Bob.txt")
}

fn zip_export(dir: &TempDir) -> PathBuf {
    dir.path().join("WhatsApp Chat with Bob.zip")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_txt_to_json() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 6 messages from 2 participants"))
        .stdout(predicate::str::contains("Self:      Alice"));

    let doc = read_json(&out);
    assert_eq!(doc["self"], "Alice");
    assert_eq!(doc["title"], "Alice & Bob");
    let messages = doc["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[2]["body"], "Sure!\nWhat time?");
    assert_eq!(messages[1]["is_self"], true);
    assert_eq!(messages[2]["is_self"], false);
}

#[test]
fn test_default_output_path() {
    let dir = setup_fixtures();

    chatview()
        .current_dir(dir.path())
        .arg("WhatsApp Chat with Bob.txt")
        .assert()
        .success();

    assert!(dir.path().join("chat.json").exists());
}

#[test]
fn test_zip_without_media_dir() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(zip_export(&dir))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 extracted"));

    let doc = read_json(&out);
    assert!(doc.get("media").is_none());
    assert_eq!(doc["messages"][4]["attachment"], "00000003-PHOTO-2024-01-15-10-32-00.jpg");
}

#[test]
fn test_zip_with_media_dir() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");
    let media = dir.path().join("media");

    chatview()
        .arg(zip_export(&dir))
        .arg("-o")
        .arg(&out)
        .arg("--media-dir")
        .arg(&media)
        .assert()
        .success();

    let doc = read_json(&out);
    let handle = doc["media"]["00000003-PHOTO-2024-01-15-10-32-00.jpg"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(doc["messages"][4]["media"], handle.as_str());
    assert_eq!(fs::read(&handle).unwrap(), b"\xFF\xD8\xFFfake-jpeg");

    // The traversal entry never lands anywhere
    assert_eq!(fs::read_dir(&media).unwrap().count(), 1);
    assert!(!dir.path().join("evil.jpg").exists());
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_jsonl_output() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.jsonl");

    chatview()
        .arg(txt(&dir))
        .args(["-f", "jsonl", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing JSONL"));

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 6);
    for line in content.lines() {
        let record: Value = serde_json::from_str(line).unwrap();
        assert!(record.get("timestamp").is_some());
    }
}

#[test]
fn test_ndjson_alias() {
    let dir = setup_fixtures();

    chatview()
        .current_dir(dir.path())
        .arg(txt(&dir))
        .args(["-f", "ndjson"])
        .assert()
        .success();

    assert!(dir.path().join("chat.jsonl").exists());
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_single_day_filter() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .args(["--date-from", "2024-01-15", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 messages after filtering"));

    let doc = read_json(&out);
    assert_eq!(doc["messages"].as_array().unwrap().len(), 3);
}

#[test]
fn test_date_range_filter() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .args(["--date-from", "2024-01-15", "--date-to", "2024-01-16", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(read_json(&out)["messages"].as_array().unwrap().len(), 4);
}

#[test]
fn test_sender_filter() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .args(["--from", "bob", "-o"])
        .arg(&out)
        .assert()
        .success();

    let doc = read_json(&out);
    let messages = doc["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages.iter().all(|m| m["sender"] == "Bob"));
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_self_override() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .args(["--self", "Bob", "-o"])
        .arg(&out)
        .assert()
        .success();

    let doc = read_json(&out);
    assert_eq!(doc["self"], "Bob");
    assert_eq!(doc["messages"][2]["is_self"], true);
}

#[test]
fn test_swap() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .arg("--swap")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("everyone except Alice"));

    let doc = read_json(&out);
    assert_eq!(doc["messages"][1]["is_self"], false);
    assert_eq!(doc["messages"][2]["is_self"], true);
}

#[test]
fn test_no_system() {
    let dir = setup_fixtures();
    let out = dir.path().join("out.json");

    chatview()
        .arg(txt(&dir))
        .arg("--no-system")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let doc = read_json(&out);
    let messages = doc["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|m| m.get("system").is_none()));
}

#[test]
fn test_help() {
    chatview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--media-dir"))
        .stdout(predicate::str::contains("--date-from"));
}

#[test]
fn test_version() {
    chatview()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_unrecognized_file() {
    let dir = setup_fixtures();

    chatview()
        .current_dir(dir.path())
        .arg("notes.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a recognizable WhatsApp chat export"));

    assert!(!dir.path().join("chat.json").exists());
}

#[test]
fn test_invalid_date() {
    let dir = setup_fixtures();

    chatview()
        .arg(txt(&dir))
        .args(["--date-from", "15/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_missing_input() {
    chatview()
        .arg("/nonexistent/chat.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_broken_zip() {
    let dir = setup_fixtures();

    chatview()
        .arg(dir.path().join("broken.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unreadable ZIP archive"));
}

#[test]
fn test_unknown_format_flag() {
    let dir = setup_fixtures();

    chatview()
        .arg(txt(&dir))
        .args(["-f", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("csv"));
}
