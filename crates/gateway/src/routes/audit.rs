// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Read-only access to the append-only audit log.

use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use ctg_core::AuditEvent;
use serde::Deserialize;
use std::sync::Arc;

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

pub async fn audit_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuditLogQuery>,
) -> Json<Vec<AuditEvent>> {
    Json(state.audit.recent(query.limit, query.offset))
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
