//! End-to-end runs of the binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("airport_dict").expect("binary exists");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn writes_document_to_stdout() {
    cmd()
        .arg(fixture("single.geojson"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        ))
        .stdout(predicate::str::contains(r#"<d:entry id="{SPI}""#))
        .stdout(predicate::str::contains("<b>US Airports</b>"));
}

#[test]
fn flags_change_rendering() {
    cmd()
        .arg(fixture("single.geojson"))
        .args([
            "--product-name",
            "Illinois Airports",
            "--as-of",
            "May 2025",
            "--icao-priority",
            "2",
            "--show-status",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<b>Illinois Airports</b>"))
        .stdout(predicate::str::contains("Airports current as of May 2025"))
        .stdout(predicate::str::contains(
            r#"<d:index d:value="KSPI" d:title="KSPI (Airport)" d:priority="2"/>"#,
        ))
        .stdout(predicate::str::contains("<dd>OPERATIONAL</dd>"));
}

#[test]
fn writes_to_output_file() {
    let dir = TempDir::new().expect("create temp dir");
    let out = dir.path().join("Airports.xml");

    cmd()
        .arg(fixture("airports.geojson"))
        .arg("-o")
        .arg(&out)
        .args(["--duplicates", "suffix"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let xml = fs::read_to_string(&out).expect("output written");
    assert!(xml.contains(r#"id="{8B2F1C2D-0001}-2""#));
}

#[test]
fn wrong_type_exits_cleanly_without_document() {
    cmd()
        .arg(fixture("not_a_collection.geojson"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Expected GeoJSON FeatureCollection"));
}

#[test]
fn missing_input_fails() {
    cmd()
        .arg(fixture("nope.geojson"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn rejects_unknown_duplicate_policy() {
    cmd()
        .arg(fixture("single.geojson"))
        .args(["--duplicates", "merge"])
        .assert()
        .failure();
}
