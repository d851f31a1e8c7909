//! End-to-end extraction over the Go fixture tree
//!
//! Key validations:
//! - value and pointer receivers, named and unnamed
//! - single-line, inline-body and multi-line declarations
//! - comments never produce declarations
//! - test files are not scanned
//! - output is sorted and independent of pool size

use ifacegen::{Assembler, ExtractError, InterfaceStyle, extract};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/go")
}

fn expected_signatures() -> Vec<String> {
    let mut expected: Vec<String> = [
        "SimpleRefReceiver()",
        "SimpleValueReceiver()",
        "SimpleUnnamedRefReceiver()",
        "SimpleUnnamedValueReceiver()",
        "ParamsInline(a string, b int)",
        "ParamsMultiline(a string, b int, c interface{})",
        "ReturnsInline() (int, string)",
        "ReturnsInlineNamed() (a, b int, c string)",
        "ReturnsMultilineNamed() (a, b int, c string, d error)",
        "InlineEmpty()",
        "InlineFunc(a string) bool",
        "ReturnsMultilineNamedWithComment() (a, b int, d error)",
        "Nested(ctx context.Context) error",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    expected.sort();
    expected
}

#[test]
fn test_extract_fixture_tree() {
    let extraction = extract("Example", fixture_root(), 5).unwrap();

    assert!(extraction.is_complete(), "{:?}", extraction.errors);
    assert_eq!(extraction.signatures, expected_signatures());
    assert_eq!(extraction.stats.files_discovered, 4);
}

#[test]
fn test_excluded_methods_never_appear() {
    let extraction = extract("Example", fixture_root(), 5).unwrap();

    for unwanted in [
        "unexported",
        "lowerInline",
        "NotOurs",
        "CommentedOut",
        "InCommentBlock",
        "OnlyInTests",
    ] {
        assert!(
            !extraction.signatures.iter().any(|s| s.contains(unwanted)),
            "{unwanted} leaked into {:?}",
            extraction.signatures
        );
    }
}

#[test]
fn test_other_receiver() {
    let extraction = extract("Other", fixture_root(), 2).unwrap();
    assert_eq!(extraction.signatures, vec!["NotOurs()"]);
}

#[test]
fn test_unknown_receiver_yields_empty_list() {
    let extraction = extract("Missing", fixture_root(), 2).unwrap();
    assert!(extraction.signatures.is_empty());
    assert!(extraction.is_complete());
}

#[test]
fn test_pool_size_does_not_change_output() {
    let baseline = extract("Example", fixture_root(), 1).unwrap().signatures;
    for pool_size in [0, 2, 3, 16] {
        let signatures = extract("Example", fixture_root(), pool_size)
            .unwrap()
            .signatures;
        assert_eq!(signatures, baseline, "pool size {pool_size}");
    }
}

#[test]
fn test_root_path_not_exists() {
    let err = extract("Example", fixture_root().join("not_exists"), 5).unwrap_err();
    assert!(matches!(err, ExtractError::PathNotFound { .. }));
}

#[test]
fn test_root_path_is_file() {
    let err = extract("Example", fixture_root().join("file1.go"), 5).unwrap_err();
    assert!(matches!(err, ExtractError::PathIsFile { .. }));
}

#[test]
fn test_assembled_fixture_output() {
    let extraction = extract("Other", fixture_root(), 2).unwrap();
    let rendered = Assembler::new("Others")
        .with_package(Some("fixture"))
        .with_style(InterfaceStyle::Go)
        .render_to_string(&extraction.signatures);

    assert_eq!(
        rendered,
        "package fixture\n\ntype Others interface {\n\tNotOurs()\n}\n"
    );
}
