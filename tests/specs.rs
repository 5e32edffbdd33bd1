//! Behavioral specifications for the cloud terminal gateway daemons.
//!
//! These tests are black-box: they invoke the compiled `ctg-gatewayd`/
//! `ctg-forwarderd` binaries and verify stdout, stderr, and exit codes.
//! Anything that requires real cloud credentials (scanning, SSM sessions,
//! port forwarding) is covered by the unit/integration tests inside each
//! crate instead; these specs only exercise the process-level surface:
//! flag handling and startup-time config validation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/gateway/help.rs"]
mod gateway_help;
#[path = "specs/gateway/config_validation.rs"]
mod gateway_config_validation;

#[path = "specs/forwarder/help.rs"]
mod forwarder_help;
#[path = "specs/forwarder/config_validation.rs"]
mod forwarder_config_validation;
