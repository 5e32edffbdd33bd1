// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Fleet discovery routes: the instance tree, scan control, and aggregates.

use crate::error::GatewayError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use ctg_core::{AuditEvent, FleetStats, FleetSummary, InstanceTree, ScanStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub async fn instances(State(state): State<Arc<AppState>>) -> Json<InstanceTree> {
    state.discovery.warm_from_snapshot();
    let tree = state
        .discovery
        .cache()
        .get()
        .map(|r| r.tree)
        .unwrap_or_default();
    Json(tree)
}

#[derive(Debug, Deserialize)]
pub struct ScanInstancesQuery {
    #[serde(default)]
    force: bool,
}

#[derive(Debug, Serialize)]
pub struct ScanStartedResponse {
    status: &'static str,
}

/// Kicks off a full scan in the background and returns immediately;
/// progress is observed via `GET /scan-status`.
pub async fn scan_instances(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanInstancesQuery>,
) -> Result<Json<ScanStartedResponse>, GatewayError> {
    let ttl = state.config.cache_ttl_seconds;
    let discovery = Arc::clone(&state.discovery);
    tokio::spawn(async move {
        if let Err(err) = discovery.scan(query.force, ttl).await {
            tracing::warn!(error = %err, "background scan failed");
        }
    });
    Ok(Json(ScanStartedResponse { status: "scan_started" }))
}

#[derive(Debug, Deserialize)]
pub struct ScanRegionQuery {
    profile: String,
    region: String,
}

#[derive(Debug, Serialize)]
pub struct ScanRegionResponse {
    status: &'static str,
    instances: usize,
}

pub async fn scan_region(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanRegionQuery>,
) -> Result<Json<ScanRegionResponse>, GatewayError> {
    let count = state.discovery.scan_region(&query.profile, &query.region).await?;
    state.audit.append(
        &AuditEvent::now("scan_region").with_profile_region(query.profile, query.region),
    ).unwrap_or_else(|err| tracing::warn!(error = %err, "failed to append audit event"));
    Ok(Json(ScanRegionResponse { status: "ok", instances: count }))
}

pub async fn scan_status(State(state): State<Arc<AppState>>) -> Json<ScanStatus> {
    Json(state.discovery.cache().status())
}

pub async fn fleet_stats(State(state): State<Arc<AppState>>) -> Json<FleetStats> {
    Json(state.discovery.fleet_stats())
}

pub async fn fleet_summary(State(state): State<Arc<AppState>>) -> Json<FleetSummary> {
    Json(state.discovery.fleet_summary())
}

#[derive(Debug, Deserialize)]
pub struct InstanceMetricsQuery {
    instance_id: String,
}

pub async fn instance_metrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InstanceMetricsQuery>,
) -> Result<Json<ctg_core::InstanceMetrics>, GatewayError> {
    let instance = state
        .discovery
        .cache()
        .get_instance(&query.instance_id)
        .ok_or(ctg_discovery::DiscoveryError::InstanceNotFound(query.instance_id.clone()))?;
    let client = crate::state::ssm_client(&instance.aws_profile, &instance.aws_region).await;
    let metrics = ctg_transfer::instance_metrics(&client, &instance.instance_id, &instance.platform).await?;
    Ok(Json(metrics))
}

#[cfg(test)]
#[path = "instances_tests.rs"]
mod tests;
