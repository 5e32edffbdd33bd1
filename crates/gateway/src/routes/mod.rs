// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The gateway's JSON-over-HTTP surface, per module.

mod audit;
mod instances;
mod transfer;

use crate::bridge;
use crate::state::AppState;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| bridge::handle_socket(socket, state))
}

pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/instances", get(instances::instances))
        .route("/scan-instances", get(instances::scan_instances))
        .route("/scan-region", get(instances::scan_region))
        .route("/scan-status", get(instances::scan_status))
        .route("/fleet-stats", get(instances::fleet_stats))
        .route("/fleet-summary", get(instances::fleet_summary))
        .route("/instance-metrics", get(instances::instance_metrics))
        .route("/browse-directory", post(transfer::browse_directory))
        .route("/upload-file", post(transfer::upload_file))
        .route("/download-file", post(transfer::download_file))
        .route("/broadcast-command", post(transfer::broadcast_command))
        .route("/audit-log", get(audit::audit_log))
        .route("/ws", get(ws_upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
