//! Runs the built binary against scratch trees

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn ifacegen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ifacegen"))
}

fn run(workdir: &Path, args: &[&str]) -> Output {
    Command::new(ifacegen_binary())
        .current_dir(workdir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run ifacegen")
}

fn write_store(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/store.go"),
        "package store\n\nfunc (s *Store) Put(\n\tkey string,\n\tvalue []byte,\n) error {\n\treturn nil\n}\n\nfunc (s *Store) Get(key string) ([]byte, bool) {\n\treturn nil, false\n}\n",
    )
    .unwrap();
}

#[test]
fn test_stdout_output() {
    let temp_dir = TempDir::new().unwrap();
    write_store(temp_dir.path());

    let output = run(temp_dir.path(), &["--struct", "Store", "--root", "src"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "interface Store {\n\tGet(key string) ([]byte, bool)\n\tPut(key string, value []byte) error\n}\n"
    );
}

#[test]
fn test_file_output_with_package_and_inject() {
    let temp_dir = TempDir::new().unwrap();
    write_store(temp_dir.path());

    let output = run(
        temp_dir.path(),
        &[
            "-s",
            "Store",
            "-r",
            "src",
            "--interface",
            "KV",
            "--package",
            "kv",
            "--inject",
            "// generated\\n",
            "--style",
            "go",
            "--out",
            "gen/kv",
        ],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(temp_dir.path().join("gen/kv.go")).unwrap();
    assert_eq!(
        written,
        "package kv\n\n// generated\n\n\ntype KV interface {\n\tGet(key string) ([]byte, bool)\n\tPut(key string, value []byte) error\n}\n"
    );
}

#[test]
fn test_invalid_root_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(temp_dir.path(), &["--struct", "Store", "--root", "nope"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_no_source_files_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("only_test.go"), "package x\n").unwrap();

    let output = run(temp_dir.path(), &["--struct", "Store"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_partial_failure_still_renders_unless_strict() {
    let temp_dir = TempDir::new().unwrap();
    write_store(temp_dir.path());
    fs::write(temp_dir.path().join("src/broken.go"), [0xff, 0x0a]).unwrap();

    let output = run(temp_dir.path(), &["--struct", "Store", "--root", "src"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("interface Store {"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[0] Failed to read file"));

    let strict = run(
        temp_dir.path(),
        &["--struct", "Store", "--root", "src", "--strict"],
    );
    assert_eq!(strict.status.code(), Some(3));
    assert!(strict.stdout.is_empty());
}

#[test]
fn test_settings_file_is_honoured() {
    let temp_dir = TempDir::new().unwrap();
    write_store(temp_dir.path());
    let config_dir = temp_dir.path().join(".ifacegen");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("settings.toml"), "[output]\nstyle = \"go\"\n").unwrap();

    let output = run(temp_dir.path(), &["--struct", "Store", "--root", "src"]);
    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("type Store interface {"));
}
