// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The cloud terminal gateway: HTTP/WebSocket front door over discovery,
//! terminal sessions, and shell-channel transfer.

mod bridge;
mod error;
mod routes;
mod state;

pub use bridge::{ClientFrame, ServerFrame};
pub use error::GatewayError;
pub use routes::build as build_router;
pub use state::AppState;
