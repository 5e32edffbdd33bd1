// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Wire shapes for instance metrics and fleet-wide command broadcast.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceMetrics {
    pub cpu_load: f64,
    pub cpu_count: u32,
    pub mem_used_pct: f64,
    pub mem_total_mb: u64,
    pub mem_used_mb: u64,
    pub disk_used_pct: f64,
    pub disk_total_gb: f64,
    pub disk_used_gb: f64,
    pub uptime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastTarget {
    pub instance_id: String,
    pub name: String,
    pub profile: String,
    pub region: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub instance_id: String,
    pub name: String,
    #[serde(default)]
    pub output: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub error: String,
    pub success: bool,
}

#[cfg(test)]
#[path = "transfer_types_tests.rs"]
mod tests;
