//! Forwarder daemon flag handling.
//!
//! Verifies `ctg-forwarderd --help`/`--version` work without loading
//! configuration or binding a port.

use crate::prelude::*;

#[test]
fn version_flag_prints_version_and_exits_zero() {
    let output = forwarderd_cmd().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ctg-forwarderd 0.1.0"), "got: {stdout}");
}

#[test]
fn help_flag_shows_usage() {
    let output = forwarderd_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "got: {stdout}");
    assert!(stdout.contains("ctg-forwarderd"), "got: {stdout}");
}
