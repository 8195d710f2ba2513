//! Integration tests for the delve CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn delve() -> Command {
    Command::cargo_bin("delve").unwrap()
}

fn script(dir: &TempDir, lines: &str) -> std::path::PathBuf {
    let path = dir.path().join("script.txt");
    fs::write(&path, lines).unwrap();
    path
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_prints_the_transcript() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "open mailbox\ntake leaflet\n\n# comment\nread leaflet\n");
    delve()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("West of House"))
        .stdout(predicate::str::contains("Opening the small mailbox reveals a leaflet."))
        .stdout(predicate::str::contains("Taken."))
        .stdout(predicate::str::contains("WELCOME TO DELVE!"))
        .stdout(predicate::str::contains("comment").not());
}

#[test]
fn run_is_deterministic_for_a_seed() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "north\nnorth\nnorth\nwait\nwait\nsouth\n");
    let first = delve().args(["run", "--seed", "7"]).arg(&path).output().unwrap();
    let second = delve().args(["run", "--seed", "7"]).arg(&path).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn run_stops_at_quit() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "quit\nnorth\n");
    delve()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Your score is 0"))
        .stdout(predicate::str::contains("North of House").not());
}

#[test]
fn run_missing_script_fails() {
    delve()
        .args(["run", "/nonexistent/script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_reads_commands_from_stdin() {
    delve()
        .arg("play")
        .write_stdin("open mailbox\ntake leaflet\ninventory\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opening the small mailbox reveals a leaflet."))
        .stdout(predicate::str::contains("A leaflet"))
        .stdout(predicate::str::contains("Your score is 0"));
}

#[test]
fn play_ends_at_end_of_input() {
    delve()
        .arg("play")
        .write_stdin("north\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("North of House"));
}

#[test]
fn play_verbose_describes_repeat_visits() {
    delve()
        .args(["play", "--verbose"])
        .write_stdin("north\nwest\nnorth\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Maximum verbosity.").not())
        .stdout(predicate::str::contains("You are facing the north side").count(2));
}

#[test]
fn save_and_load_resume_the_game() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("game.json");
    delve()
        .arg("play")
        .write_stdin(format!(
            "open mailbox\ntake leaflet\nnorth\nsave {}\nquit\n",
            save.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));
    assert!(save.exists());

    delve()
        .arg("play")
        .arg("--load")
        .arg(&save)
        .write_stdin("inventory\nscore\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("North of House"))
        .stdout(predicate::str::contains("A leaflet"))
        .stdout(predicate::str::contains("in 4 moves"));
}

#[test]
fn restore_inside_the_loop() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("game.json");
    delve()
        .arg("play")
        .write_stdin(format!(
            "open mailbox\nsave {path}\ntake leaflet\nrestore {path}\ninventory\n",
            path = save.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored."))
        .stdout(predicate::str::contains("You are empty-handed."));
}

#[test]
fn loading_a_bad_save_fails() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("bad.json");
    fs::write(&save, "not json").unwrap();
    delve()
        .arg("play")
        .arg("--load")
        .arg(&save)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    delve()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("run"));
}
