// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use ctg_cloud::CloudError;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    Channel(#[from] CloudError),
    #[error("remote file not found: {0}")]
    NotFound(String),
    #[error("invalid directory listing record: {0:?}")]
    MalformedListing(String),
    #[error("base64 decode failed: {0}")]
    Decode(String),
}
