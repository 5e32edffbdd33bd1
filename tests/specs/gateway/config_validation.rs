//! Startup rejects a bad port range before ever binding a socket.

use crate::prelude::*;

#[test]
fn inverted_port_range_fails_before_startup() {
    let output = gatewayd_cmd()
        .env("PORT_RANGE_START", "40000")
        .env("PORT_RANGE_END", "39000")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn port_range_overflowing_the_internal_offset_fails_before_startup() {
    let output = gatewayd_cmd()
        .env("PORT_RANGE_START", "60000")
        .env("PORT_RANGE_END", "60100")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
