// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Identifiers and wire-level DTOs shared between the Session Multiplexer
//! and the Client Bridge. The live PTY/process handles themselves live in
//! `ctg-terminal`; this crate only knows the identifiers and message shapes.

crate::define_id! {
    /// Opaque, client-supplied session identifier.
    pub struct SessionId;
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
