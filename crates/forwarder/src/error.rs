// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    #[error("all ports in range {start}-{end} are exhausted")]
    PortsExhausted { start: u16, end: u16 },
    #[error("no active session for instance {0}")]
    NotFound(String),
    #[error("failed to launch {0}: {1}")]
    Spawn(&'static str, std::io::Error),
    #[error("instance_id is required")]
    MissingInstanceId,
    #[error("{0} exited before reporting a pid")]
    MissingPid(&'static str),
}

impl IntoResponse for ForwarderError {
    fn into_response(self) -> Response {
        let status = match &self {
            ForwarderError::PortsExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ForwarderError::NotFound(_) => StatusCode::NOT_FOUND,
            ForwarderError::MissingInstanceId => StatusCode::BAD_REQUEST,
            ForwarderError::Spawn(..) => StatusCode::INTERNAL_SERVER_ERROR,
            ForwarderError::MissingPid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
