//! Tests for the `bramble` launcher binary.
//!
//! Each test runs the binary with `HOME` pointing into a temporary directory
//! so user-area state never leaks between runs.

#![allow(non_snake_case)]

use std::process::{Command, Output};
use tempfile::TempDir;

fn bramble(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bramble"))
        .args(args)
        .env("HOME", home.path())
        .output()
        .unwrap()
}

#[test]
fn bramble___help___prints_options_and_exits_ok() {
    let home = TempDir::new().unwrap();

    let output = bramble(&home, &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--clean"), "{stdout}");
    assert!(stdout.contains("--application"), "{stdout}");
    assert!(stdout.contains("--testapplication"), "{stdout}");
}

#[test]
fn bramble___no_application___exits_ok_and_writes_user_area() {
    let home = TempDir::new().unwrap();

    let output = bramble(&home, &[]);

    assert_eq!(output.status.code(), Some(0));
    let user = home.path().join(".bramble");
    assert!(user.join("bramble.log").exists());
    assert!(user.join(".metadata/platform-state.json").exists());
}

#[test]
fn bramble___unknown_application___exits_with_software_error() {
    let home = TempDir::new().unwrap();

    let output = bramble(&home, &["--application=org.example.missing"]);

    assert_eq!(output.status.code(), Some(70));
}

#[test]
fn bramble___unknown_option___is_ignored() {
    let home = TempDir::new().unwrap();

    let output = bramble(&home, &["--no-such-option", "input.txt"]);

    assert_eq!(output.status.code(), Some(0));
}
