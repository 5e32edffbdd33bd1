// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ctg_discovery::DiscoveryError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Cloud(#[from] ctg_cloud::CloudError),
    #[error(transparent)]
    Transfer(#[from] ctg_transfer::TransferError),
    #[error(transparent)]
    Terminal(#[from] ctg_terminal::TerminalError),
    #[error("invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Discovery(DiscoveryError::Busy) => StatusCode::CONFLICT,
            GatewayError::Discovery(DiscoveryError::InstanceNotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Terminal(ctg_terminal::TerminalError::NotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Terminal(ctg_terminal::TerminalError::AlreadyExists(_)) => StatusCode::CONFLICT,
            GatewayError::Transfer(ctg_transfer::TransferError::NotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
