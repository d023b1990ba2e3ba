//! Integration tests for the spy CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spy() -> Command {
    let mut cmd = Command::cargo_bin("spy").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// -- roles --

#[test]
fn roles_without_blank() {
    spy()
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Players"))
        .stdout(predicate::str::contains("without blank"));
}

#[test]
fn roles_with_blank() {
    spy()
        .args(["roles", "--blank"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with blank"))
        .stdout(predicate::str::contains("Blank"));
}

// -- play --

#[test]
fn play_single_game() {
    spy()
        .args(["play", "--players", "4", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Who is the Spy"))
        .stdout(predicate::str::contains("Spies"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn play_many_games_with_blank() {
    spy()
        .args([
            "play", "--players", "7", "--games", "3", "--blank", "--blanks-late", "--sequential",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wins by role"));
}

#[test]
fn play_chinese_locale() {
    spy()
        .args(["play", "--players", "5", "--locale", "zh"])
        .assert()
        .success();
}

#[test]
fn play_json_reports() {
    let output = spy()
        .args(["play", "--players", "6", "--games", "2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let report: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(report.get("game_id").is_some());
        assert!(report.get("rounds").is_some());
    }
}

#[test]
fn play_same_seed_same_result() {
    let run = || {
        spy()
            .args(["play", "--players", "6", "--games", "2", "--seed", "9", "--json"])
            .output()
            .unwrap()
    };
    let strip_ids = |bytes: Vec<u8>| -> Vec<serde_json::Value> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| {
                let mut v: serde_json::Value = serde_json::from_str(l).unwrap();
                v.as_object_mut().unwrap().remove("game_id");
                v
            })
            .collect()
    };
    assert_eq!(strip_ids(run().stdout), strip_ids(run().stdout));
}

#[test]
fn play_too_few_players_fails() {
    spy()
        .args(["play", "--players", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn play_too_many_players_fails() {
    spy()
        .args(["play", "--players", "10"])
        .assert()
        .failure();
}

#[test]
fn play_unknown_locale_fails() {
    spy()
        .args(["play", "--locale", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown locale"));
}

#[test]
fn play_image_without_pairs_fails() {
    spy()
        .args(["play", "--image"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no image key pairs"));
}

// -- keys and transcripts --

#[test]
fn play_with_key_file() {
    let dir = TempDir::new().unwrap();
    let keys = dir.path().join("keys.jsonl");
    fs::write(
        &keys,
        "{\"Civilian\": \"violin\", \"Spy\": \"cello\"}\n\n{\"Civilian\": \"tea\", \"Spy\": \"coffee\"}\n",
    )
    .unwrap();

    spy()
        .args(["play", "--players", "4", "--keys"])
        .arg(&keys)
        .assert()
        .success();
}

#[test]
fn play_with_bad_key_file_fails() {
    let dir = TempDir::new().unwrap();
    let keys = dir.path().join("keys.jsonl");
    fs::write(&keys, "not json\n").unwrap();

    spy()
        .args(["play", "--players", "4", "--keys"])
        .arg(&keys)
        .assert()
        .failure();
}

#[test]
fn play_with_image_keys() {
    let dir = TempDir::new().unwrap();
    let pair = dir.path().join("fruit");
    fs::create_dir(&pair).unwrap();
    fs::write(pair.join("Civilian.jpg"), b"c").unwrap();
    fs::write(pair.join("Spy.jpg"), b"s").unwrap();

    spy()
        .args(["play", "--players", "5", "--image", "--image-keys"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[image:"));
}

#[test]
fn play_writes_json_lines_transcript() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.jsonl");

    spy()
        .args(["play", "--players", "4", "--transcript"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcript written"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.is_empty());
    for line in content.lines() {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(entry.get("log_msg").is_some());
    }
    assert!(content.contains("init game"));
    assert!(content.contains("check game over"));
}

#[test]
fn play_writes_markdown_transcript() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.md");

    spy()
        .args(["play", "--players", "4", "--transcript"])
        .arg(&path)
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("## Game 1"));
    assert!(content.contains("### Round 1"));
}

#[test]
fn version_flag() {
    spy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("spy"));
}
