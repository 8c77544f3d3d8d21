use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let tones = dir.path().join("assets").join("rtttl");
    fs::create_dir_all(&tones).unwrap();

    fs::write(tones.join("Imperial March.txt"), "imperial:d=4,o=5,b=100:c,c,c,8d#,8p").unwrap();
    fs::write(tones.join("Mario V2.txt"), "mario:d=4,o=5,b=100:e,e,p,e").unwrap();
    fs::write(tones.join("Mario.txt"), "mario:d=4,o=5,b=100:e,e,p,e").unwrap();
    fs::write(tones.join("Pager.txt"), "pg:d=4,o=5,b=100:d,d").unwrap();
    fs::write(tones.join("blank.txt"), "\n\n").unwrap();
    fs::write(tones.join("garbage.bas"), b"\x01\x02HEX:0F1E2D\x03").unwrap();
    dir
}

fn bin() -> Command {
    Command::cargo_bin("rtttl-library").unwrap()
}

fn read_library(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn compiles_default_paths_with_no_arguments() {
    let dir = project();

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Output file size"))
        .stderr(predicate::str::contains("Skipped 2 invalid files"));

    let library = read_library(&dir.path().join("assets").join("rtttl_library.json"));
    assert_eq!(library["version"], 1);

    let tones = library["tones"].as_array().unwrap();
    assert_eq!(tones.len(), 11 + 2);
    assert_eq!(tones[0]["displayName"], "Meshtastic Default");
    assert_eq!(tones[10]["displayName"], "Pager");
    assert_eq!(tones[10]["builtin"], true);

    let imperial = &tones[11];
    assert_eq!(imperial["filename"], "Imperial March.txt");
    assert_eq!(imperial["displayName"], "Imperial March");
    assert_eq!(imperial["toneName"], "imperial");
    assert!(imperial["artist"].is_null());
    assert_eq!(imperial["rtttl"], "imperial:d=4,o=5,b=100:c,c,c,8d#,8p");
    assert!(imperial.get("builtin").is_none());

    assert_eq!(tones[12]["displayName"], "Mario");
}

#[test]
fn missing_source_directory_fails() {
    let dir = TempDir::new().unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("RTTTL directory not found"))
        .stderr(predicate::str::contains("Suggestion: Run from the project root"));

    assert!(!dir.path().join("assets").join("rtttl_library.json").exists());
}

#[test]
fn json_report_on_stdout() {
    let dir = project();

    let output = bin()
        .args(["--root", dir.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["trusted_files"], 5);
    assert_eq!(report["mixed_files"], 1);
    assert_eq!(report["skipped"], 2);
    assert_eq!(report["content_duplicates"], 1);
    assert_eq!(report["shadowed"], 1);
    assert_eq!(report["total_tones"], 13);
}

#[test]
fn explicit_source_and_output() {
    let dir = project();
    let out = dir.path().join("build").join("tones.json");

    bin()
        .args(["--quiet", "--source"])
        .arg(dir.path().join("assets").join("rtttl"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let library = read_library(&out);
    assert_eq!(library["tones"].as_array().unwrap().len(), 13);
}

#[test]
fn config_file_selects_directories() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("tones")).unwrap();
    fs::write(dir.path().join("tones").join("Beep Beep.txt"), "bb:d=4:c,c").unwrap();
    fs::write(
        dir.path().join(".meshtool.toml"),
        "[rtttl]\nsource_dir = \"tones\"\noutput_file = \"lib.json\"\n",
    )
    .unwrap();

    bin().current_dir(dir.path()).assert().success();

    let library = read_library(&dir.path().join("lib.json"));
    let tones = library["tones"].as_array().unwrap();
    assert_eq!(tones.last().unwrap()["displayName"], "Beep Beep");
}
