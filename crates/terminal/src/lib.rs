// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Session multiplexer: a table of pty-backed interactive sessions, one
//! per connected terminal.

mod error;
mod multiplexer;
mod session;

pub use error::TerminalError;
pub use multiplexer::Multiplexer;
pub use session::{EndedSink, OutputSink, Session};
