// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Size-scaled deadlines shared by upload and download.

use std::time::Duration;

const MIB: u64 = 1024 * 1024;

/// `10 minutes + 2 minutes per MiB (rounded up)` of payload.
pub fn scaled_deadline(byte_len: u64) -> Duration {
    let units = byte_len.div_ceil(MIB);
    Duration::from_secs(10 * 60 + units * 2 * 60)
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
