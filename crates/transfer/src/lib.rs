// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shell-channel transfer operations: upload, download, directory listing,
//! instance metrics, and command broadcast, all issued through the agent
//! channel's `sendCommand`/`getCommandInvocation` cycle.

mod browse;
mod broadcast;
mod download;
mod error;
mod metrics;
mod timing;
mod upload;

pub use browse::browse_directory;
pub use broadcast::broadcast_command;
pub use download::{download_file, DownloadedFile};
pub use error::TransferError;
pub use metrics::instance_metrics;
pub use upload::upload_file;
