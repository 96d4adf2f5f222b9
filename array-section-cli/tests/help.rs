use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("array-section");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("array-of-objects"))
        .stdout(contains("--modal-size"));
}

#[test]
fn rejects_non_array_schema() {
    let logs = tempfile::tempdir().unwrap();
    let mut cmd = cargo::cargo_bin_cmd!("array-section");
    cmd.args(["--schema", r#"{"type": "object"}"#, "--log-file"])
        .arg(logs.path().join("array-section.log"))
        .assert()
        .failure()
        .stderr(contains("not an array"));
}
