// Binary-level regression tests for the runner's fatal paths and exit
// codes. Happy-path runs against a compiled module live in
// module_loading.rs.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_module_path_aborts_the_run() {
    Command::cargo_bin("pariksha")
        .unwrap()
        .args(["--no-color", "definitely/not/a/module.so"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn non_module_file_is_a_load_failure() {
    Command::cargo_bin("pariksha")
        .unwrap()
        .args(["--no-color", "Cargo.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn at_least_one_module_path_is_required() {
    Command::cargo_bin("pariksha").unwrap().assert().failure();
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("pariksha")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pariksha"));
}
