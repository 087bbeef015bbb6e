#![cfg(feature = "cli")]

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::{fixture_json, fixture_path, read_fixture};
use usdj_am::utils::Document;

fn usdj_am(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_usdj-am"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("usdj-am must run")
}

fn stdout(output: &Output) -> &str {
    assert!(
        output.status.success(),
        "usdj-am failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    std::str::from_utf8(&output.stdout).unwrap()
}

fn import(stem: &str, target: &Path) {
    let input = fixture_path(&format!("{stem}.usda.json"));
    let output = usdj_am(&[
        "import",
        input.to_str().unwrap(),
        target.to_str().unwrap(),
        "--session",
        "131072",
    ]);
    stdout(&output);
}

#[test]
fn import_then_export_reproduces_the_usda_json() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("helloWorld.usdj-am");
    import("helloWorld", &target);

    let document = Document::load(&target).unwrap();
    assert_eq!(document.view(), fixture_json("helloWorld.usda.json"));
    assert_eq!(document.model().clock.sid, 131_072);

    let output = usdj_am(&["export", target.to_str().unwrap()]);
    assert_eq!(
        stdout(&output),
        format!("{}\n", read_fixture("helloWorld.usda.json").trim_end())
    );

    let output = usdj_am(&["export", target.to_str().unwrap(), "--tabs"]);
    assert!(stdout(&output).starts_with("{\n\t\"type\": \"File\",\n\t\"descriptor\": null,"));
}

#[test]
fn check_reports_what_it_validated() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("helloWorld.usdj-am");
    import("helloWorld", &target);

    let output = usdj_am(&["check", target.to_str().unwrap()]);
    assert_eq!(
        stdout(&output),
        "ok: 2 prims, 0 variant sets, 3 declarations, 0 assignments, 15 values\n"
    );

    let output = usdj_am(&["check", target.to_str().unwrap(), "--path", "/statements/0"]);
    assert!(!output.status.success());
}

#[test]
fn reserved_sessions_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture_path("helloWorld.usda.json");
    let target = dir.path().join("refused.usdj-am");
    let output = usdj_am(&[
        "import",
        input.to_str().unwrap(),
        target.to_str().unwrap(),
        "--session",
        "5",
    ]);
    assert!(!output.status.success());
    assert!(!target.exists());
}
