//! Per-file failures are collected, never fatal

use ifacegen::{ExtractError, Extractor};
use std::fs;
use tempfile::TempDir;

fn write_tree(root: &std::path::Path, broken: usize) {
    fs::write(
        root.join("good.go"),
        "package p\n\nfunc (s *Service) Start() error {\n\treturn nil\n}\n",
    )
    .unwrap();
    for i in 0..broken {
        // Invalid UTF-8 makes the line reader fail for this file only
        fs::write(root.join(format!("broken{i}.go")), [0x66, 0xff, 0xfe, 0x0a]).unwrap();
    }
}

#[test]
fn test_partial_results_survive_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), 3);

    let extraction = Extractor::new(4)
        .extract("Service", temp_dir.path())
        .unwrap();

    assert_eq!(extraction.signatures, vec!["Start() error"]);
    assert!(!extraction.is_complete());
    assert_eq!(extraction.stats.files_scanned, 1);
    assert_eq!(extraction.stats.files_failed, 3);

    let errors = extraction.errors.expect("three files failed");
    assert_eq!(errors.len(), 3);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ExtractError::FileRead { .. }))
    );

    let rendered = errors.to_string();
    assert!(rendered.starts_with("[0] Failed to read file"));
    assert!(rendered.contains("\n[2] Failed to read file"));
}

#[test]
fn test_into_result_is_strict() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), 1);

    let extraction = Extractor::new(2)
        .extract("Service", temp_dir.path())
        .unwrap();
    assert!(extraction.into_result().is_err());
}

#[test]
fn test_clean_run_has_no_error_value() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), 0);

    let extraction = Extractor::new(2)
        .extract("Service", temp_dir.path())
        .unwrap();
    assert!(extraction.errors.is_none());
    assert_eq!(extraction.into_result().unwrap(), vec!["Start() error"]);
}
