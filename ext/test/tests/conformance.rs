//! Conformance tests that run YAML fixtures against cardinal
//!
//! Run with: cargo test -p cardinal-test --test conformance

use cardinal_test::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// The fixtures directory shipped with this crate
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    println!("Running fixture file: {}", path.display());

    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_auto_http() {
    run_fixture_file("01_auto_http.yaml");
}

#[test]
fn test_auto_bus() {
    run_fixture_file("02_auto_bus.yaml");
}

#[test]
fn test_exact_rules() {
    run_fixture_file("03_exact_rules.yaml");
}

#[test]
fn test_partial_rules() {
    run_fixture_file("04_partial_rules.yaml");
}

#[test]
fn test_invalid_rules() {
    run_fixture_file("05_invalid_rules.yaml");
}

#[test]
fn test_pipelines() {
    run_fixture_file("06_pipelines.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml"))
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "01_auto_http.yaml",
            "02_auto_bus.yaml",
            "03_exact_rules.yaml",
            "04_partial_rules.yaml",
            "05_invalid_rules.yaml",
            "06_pipelines.yaml",
        ]
    );
}
