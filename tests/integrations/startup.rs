//! Startup exit-code contract, exercised against the real binary.
//!
//! Status 1 is reserved for an unopenable log file; every other startup
//! fault (bad configuration, unreachable identity lookup) exits 2. After
//! startup nothing terminates the process, which these tests cannot
//! observe directly but the cycle tests cover at the monitor level.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(toml_content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", toml_content).unwrap();
    file
}

#[test]
fn unopenable_log_file_exits_one_with_guidance() {
    let config = write_config(
        r#"
        [logging]
        log_dir = "/nonexistent-hostwatch-logdir"
        "#,
    );

    Command::cargo_bin("hostwatch")
        .unwrap()
        .args(["--config", config.path().to_str().unwrap(), "--once"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not open the log file"));
}

#[test]
fn failed_identity_lookup_exits_two() {
    let log_dir = TempDir::new().unwrap();
    // Nothing listens on the discard port, so the lookup fails fast.
    let config = write_config(&format!(
        r#"
        [logging]
        log_dir = "{}"

        [network]
        ip_lookup_url = "http://127.0.0.1:9"
        "#,
        log_dir.path().display()
    ));

    Command::cargo_bin("hostwatch")
        .unwrap()
        .args(["--config", config.path().to_str().unwrap(), "--once"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "Failed to resolve the host identity",
        ));
}

#[test]
fn invalid_configuration_exits_two() {
    let config = write_config(
        r#"
        [measurement]
        percent_threshold = "not a number"
        "#,
    );

    Command::cargo_bin("hostwatch")
        .unwrap()
        .args(["--config", config.path().to_str().unwrap(), "--once"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to load configuration"));
}
