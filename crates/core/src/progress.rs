// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Wire shape for the newline-delimited progress stream emitted by
//! long-running shell-channel transfer operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Progress,
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub progress: u8,
    pub message: String,
    pub status: ProgressStatus,
}

impl ProgressEvent {
    pub fn progress(percent: u8, message: impl Into<String>) -> Self {
        Self {
            progress: percent,
            message: message.into(),
            status: ProgressStatus::Progress,
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            progress: 100,
            message: message.into(),
            status: ProgressStatus::Complete,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            progress: 0,
            message: message.into(),
            status: ProgressStatus::Error,
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
