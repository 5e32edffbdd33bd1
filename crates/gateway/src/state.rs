// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Shared application state handed to every route and every bridge
//! connection. Built once at startup and wrapped in a single `Arc`.

use aws_config::BehaviorVersion;
use ctg_core::GatewayConfig;
use ctg_discovery::Discovery;
use ctg_storage::AuditLog;
use ctg_terminal::Multiplexer;
use std::sync::Arc;

pub struct AppState {
    pub config: GatewayConfig,
    pub discovery: Arc<Discovery>,
    pub sessions: Arc<Multiplexer>,
    pub audit: Arc<AuditLog>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let discovery = Arc::new(Discovery::new(
            config.tag1.clone(),
            config.tag2.clone(),
            config.instances_file.clone(),
        ));
        let audit = Arc::new(AuditLog::new(config.audit_log_file.clone()));
        Self {
            config,
            discovery,
            sessions: Arc::new(Multiplexer::new()),
            audit,
        }
    }
}

/// Builds an SSM client scoped to a single (profile, region) pair. Built
/// fresh per call, matching the discovery engine's per-task client
/// construction rather than caching clients across requests.
pub async fn ssm_client(profile: &str, region: &str) -> aws_sdk_ssm::Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    aws_sdk_ssm::Client::new(&config)
}
