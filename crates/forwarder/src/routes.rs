// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use crate::error::ForwarderError;
use crate::state::ForwarderState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ctg_core::{ForwarderSessionInfo, ForwarderStartResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    active_sessions: usize,
    allocated_ports: usize,
}

async fn health(State(state): State<Arc<ForwarderState>>) -> Json<HealthResponse> {
    let (active_sessions, allocated_ports) = state.health().await;
    Json(HealthResponse { status: "ok", active_sessions, allocated_ports })
}

async fn sessions(State(state): State<Arc<ForwarderState>>) -> Json<Vec<ForwarderSessionInfo>> {
    Json(state.list_sessions().await)
}

#[derive(Debug, Deserialize)]
struct StartSessionRequest {
    instance_id: String,
    instance_name: String,
    #[serde(default = "default_profile")]
    profile: String,
    #[serde(default = "default_region")]
    region: String,
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

async fn start(
    State(state): State<Arc<ForwarderState>>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<ForwarderStartResponse>, ForwarderError> {
    let response = state
        .start_session(req.instance_id, req.instance_name, req.profile, req.region)
        .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct StopSessionRequest {
    instance_id: String,
}

#[derive(Debug, Serialize)]
struct StopSessionResponse {
    status: &'static str,
    instance_id: String,
}

async fn stop(
    State(state): State<Arc<ForwarderState>>,
    Json(req): Json<StopSessionRequest>,
) -> Result<Json<StopSessionResponse>, ForwarderError> {
    state.stop_session(&req.instance_id).await?;
    Ok(Json(StopSessionResponse { status: "stopped", instance_id: req.instance_id }))
}

pub fn build(state: Arc<ForwarderState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", get(sessions))
        .route("/start", post(start))
        .route("/stop", post(stop))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
