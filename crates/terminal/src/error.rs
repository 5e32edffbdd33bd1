// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("session {0} already exists")]
    AlreadyExists(String),
    #[error("session {0} not found")]
    NotFound(String),
    #[error("session {0} is closed")]
    Closed(String),
    #[error("failed to start pty: {0}")]
    PtySpawn(#[source] std::io::Error),
    #[error("signal delivery failed: {0}")]
    Signal(#[source] nix::errno::Errno),
}
