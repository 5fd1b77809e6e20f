//! Run-level failure tests
//!
//! Only I/O-level problems abort a run. These tests check that each one is
//! reported with the right error and that no partial output is left behind.

use std::fs;
use tempfile::TempDir;
use tour_gross_normalizer::{NormalizerError, normalize_file};

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let err = normalize_file(&dir.path().join("nope.csv"), &output, 83.0).unwrap_err();

    assert!(matches!(err, NormalizerError::InputNotFound { .. }));
    assert!(err.to_string().contains("nope.csv"));
    assert!(!output.exists());
}

#[test]
fn test_invalid_utf8_input_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    fs::write(&input, b"Artist,Actual gross\n\xff\xfe,$1\n").unwrap();

    let err = normalize_file(&input, &output, 83.0).unwrap_err();

    assert!(matches!(err, NormalizerError::Csv { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_destination_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "Artist,Actual gross\nA,$1\n").unwrap();

    // A non-empty directory cannot be replaced by the output file.
    let output = dir.path().join("out.json");
    fs::create_dir(&output).unwrap();
    fs::write(output.join("marker"), "keep").unwrap();

    let err = normalize_file(&input, &output, 83.0).unwrap_err();

    assert!(matches!(err, NormalizerError::Io { .. }));
    assert_eq!(fs::read_to_string(output.join("marker")).unwrap(), "keep");
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 2, "unexpected files: {:?}", leftovers);
}

#[test]
fn test_row_level_problems_never_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    fs::write(
        &input,
        "Artist,Actual gross,Average gross\nA,,x\nB,N/A,\nC,[a],$$\nD,$5,garbage\n",
    )
    .unwrap();

    let result = normalize_file(&input, &output, 83.0).unwrap();

    assert_eq!(result.record_count(), 1);
    assert_eq!(result.records[0].artist, "D");
    assert_eq!(result.records[0].average_gross_usd, None);
}
