use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("embd_features").expect("binary built");
    // Keep rotated log files out of the real home directory.
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

#[test]
fn cli_extracts_train_and_test() {
    let dir = tempfile::tempdir().unwrap();
    let embeddings = write(dir.path(), "vectors.txt", "cat 1 2 3\nok 5 -1 2\n");
    let train = write(dir.path(), "train.tsv", "neg\tcat dog\na\tok\npos\t\n");
    let test = write(dir.path(), "test.tsv", "a\tok cat\n");
    let out = dir.path().join("features.json");

    cli(dir.path())
        .args(["--train_set", &train, "--test_set", &test])
        .args(["--embeddings_file", &embeddings, "--embedding_size", "3"])
        .args(["--output", out.to_str().unwrap(), "--quiet"])
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["embeddingSize"], 3);
    assert_eq!(v["featureWidth"], 6);
    assert_eq!(v["train"]["labels"], serde_json::json!(["neg", "a", "pos"]));
    assert_eq!(
        v["train"]["features"],
        serde_json::json!([
            [1.0, 2.0, 3.0, 1.0, 2.0, 3.0],
            [5.0, -1.0, 2.0, 5.0, -1.0, 2.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        ])
    );
    assert_eq!(
        v["test"]["features"],
        serde_json::json!([[1.0, -1.0, 2.0, 5.0, 2.0, 3.0]])
    );
}

#[test]
fn cli_writes_to_stdout_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let embeddings = write(dir.path(), "vectors.txt", "x 1\n");
    let train = write(dir.path(), "train.tsv", "a\tx\n");

    cli(dir.path())
        .args(["--train_set", &train, "--test_set", &train])
        .args(["--embeddings_file", &embeddings, "--embedding_size", "1", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"featureWidth\":2"));
}

#[test]
fn cli_progress_bar_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let embeddings = write(dir.path(), "vectors.txt", "x 1\n");
    let train = write(dir.path(), "train.tsv", "a\tx\nb\tx\n");

    cli(dir.path())
        .args(["--train_set", &train, "--test_set", &train])
        .args(["--embeddings_file", &embeddings, "--embedding_size", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("] 100%"));
}

#[test]
fn cli_fails_on_malformed_embeddings() {
    let dir = tempfile::tempdir().unwrap();
    let embeddings = write(dir.path(), "vectors.txt", "cat 1 2 3\ndog 1 2\n");
    let train = write(dir.path(), "train.tsv", "a\tcat\n");

    cli(dir.path())
        .args(["--train_set", &train, "--test_set", &train])
        .args(["--embeddings_file", &embeddings, "--embedding_size", "3", "--quiet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed embedding line 2"));
}

#[test]
fn cli_fails_on_dataset_line_without_tab() {
    let dir = tempfile::tempdir().unwrap();
    let embeddings = write(dir.path(), "vectors.txt", "cat 1\n");
    let train = write(dir.path(), "train.tsv", "a\tcat\njust words\n");
    let out = dir.path().join("features.json");

    cli(dir.path())
        .args(["--train_set", &train, "--test_set", &train])
        .args(["--embeddings_file", &embeddings, "--embedding_size", "1"])
        .args(["--output", out.to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed dataset line 2"));

    assert!(!out.exists());
}

#[test]
fn cli_requires_train_set() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["--test_set", "test.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing --train_set"));
}

#[test]
fn cli_help() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--embeddings_file"));
}
