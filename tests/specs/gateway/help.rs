//! Gateway daemon flag handling.
//!
//! Verifies `ctg-gatewayd --help`/`--version` work without loading
//! configuration or binding a port, so these specs never touch the
//! network or the environment.

use crate::prelude::*;

#[test]
fn version_flag_prints_version_and_exits_zero() {
    let output = gatewayd_cmd().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    similar_asserts::assert_eq!(stdout.trim_end(), "ctg-gatewayd 0.1.0");
}

#[test]
fn short_version_flag_prints_version() {
    let output = gatewayd_cmd().arg("-V").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ctg-gatewayd 0.1.0"), "got: {stdout}");
}

#[test]
fn help_flag_shows_usage() {
    let output = gatewayd_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "got: {stdout}");
    assert!(stdout.contains("ctg-gatewayd"), "got: {stdout}");
}

#[test]
fn short_help_flag_shows_usage() {
    let output = gatewayd_cmd().arg("-h").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "got: {stdout}");
}
