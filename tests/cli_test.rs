// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Runs the `santa` binary against files in a scratch directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use gift_match::{Assignment, Roster, WishlistBook};
use tempfile::TempDir;

fn santa(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_santa"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn write_roster(dir: &Path, json: &str) -> String {
    let path = dir.join("roster.json");
    fs::write(&path, json).unwrap();
    path.to_str().unwrap().to_string()
}

const FAMILIES: &str = r#"[
    {"id": "ann", "group": "north"},
    {"id": "bob", "group": "north"},
    {"id": "cat", "group": "south"},
    {"id": "dan", "group": "south"},
    {"id": "eve", "group": "east"}
]"#;

#[test]
fn test_match_writes_assignment_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let roster_path = write_roster(dir.path(), FAMILIES);
    let output = dir.path().join("assignments.json");
    let output_path = output.to_str().unwrap();

    let run = santa(&["match", "--roster", &roster_path, "--output", output_path, "--seed", "9"]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let saved: Assignment = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let participants = serde_json::from_str::<Vec<gift_match::Participant>>(FAMILIES).unwrap();
    let roster = Roster::from_participants(participants).unwrap();
    assert_eq!(saved.verify(&roster), Ok(()));

    let again = santa(&["match", "--roster", &roster_path, "--output", output_path]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));

    let forced = santa(&["match", "--roster", &roster_path, "--output", output_path, "--force"]);
    assert!(forced.status.success());
}

#[test]
fn test_match_infeasible_roster() {
    let dir = TempDir::new().unwrap();
    let roster_path = write_roster(
        dir.path(),
        r#"[{"id": "a", "group": "x"}, {"id": "b", "group": "x"}, {"id": "c", "group": "y"}]"#,
    );

    let run = santa(&["match", "--roster", &roster_path]);
    assert_eq!(run.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&run.stderr).contains("No valid assignment exists"));
}

#[test]
fn test_match_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let roster_path = write_roster(
        dir.path(),
        r#"[{"id": "a", "group": "x"}, {"id": "a", "group": "y"}]"#,
    );

    let run = santa(&["match", "--roster", &roster_path]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("Invalid roster"));
}

#[test]
fn test_check_reports_groups() {
    let dir = TempDir::new().unwrap();
    let roster_path = write_roster(dir.path(), FAMILIES);

    let run = santa(&["check", "--roster", &roster_path]);
    assert!(run.status.success());
    let stdout = String::from_utf8_lossy(&run.stdout);
    assert!(stdout.contains("5 participants in 3 groups"));
    assert!(stdout.contains("north: 2"));
    assert!(stdout.contains("feasible"));
}

#[test]
fn test_reveal_before_any_match() {
    let dir = TempDir::new().unwrap();
    let assignments = dir.path().join("assignments.json");
    let wishlists = dir.path().join("wishlists.json");

    let run = santa(&[
        "reveal",
        "--assignments",
        assignments.to_str().unwrap(),
        "--wishlists",
        wishlists.to_str().unwrap(),
        "--id",
        "ann",
    ]);
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stdout).contains("Matches have not been made yet."));
    assert!(!String::from_utf8_lossy(&run.stderr).contains("Failed to read"));
    assert!(!assignments.exists());
}

#[test]
fn test_wishlist_then_reveal() {
    let dir = TempDir::new().unwrap();
    let wishlists = dir.path().join("wishlists.json");
    let wishlists_path = wishlists.to_str().unwrap();
    let items = dir.path().join("items.txt");
    fs::write(&items, "  warm socks\n\nbook about trains\n").unwrap();

    let run = santa(&[
        "wishlist",
        "--wishlists",
        wishlists_path,
        "--id",
        "bob",
        "--file",
        items.to_str().unwrap(),
    ]);
    assert!(run.status.success());
    let book: WishlistBook = serde_json::from_str(&fs::read_to_string(&wishlists).unwrap()).unwrap();
    assert_eq!(
        book.get("bob").unwrap().items(),
        &["warm socks", "book about trains"]
    );

    let assignments = dir.path().join("assignments.json");
    fs::write(&assignments, r#"{"ann": "bob", "bob": "ann"}"#).unwrap();
    let assignments_path = assignments.to_str().unwrap();

    let run = santa(&["reveal", "--assignments", assignments_path, "--wishlists", wishlists_path, "--id", "ann"]);
    assert!(run.status.success());
    let stdout = String::from_utf8_lossy(&run.stdout);
    assert!(stdout.contains("You are giving a gift to bob."));
    assert!(stdout.contains("  - warm socks"));

    let run = santa(&["reveal", "--assignments", assignments_path, "--wishlists", wishlists_path, "--id", "zed"]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stdout).contains("Matches have not been made yet."));
}
