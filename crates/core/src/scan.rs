// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The outcome of a scan, and the live status of one in progress.

use crate::instance::Instance;
use crate::tree::InstanceTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The Cache holds at most one of these; it is swapped atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub instances: Vec<Instance>,
    pub tree: InstanceTree,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "duration_secs")]
    pub scan_duration: Duration,
}

impl ScanResult {
    pub fn empty() -> Self {
        Self {
            instances: Vec::new(),
            tree: InstanceTree::default(),
            timestamp: Utc::now(),
            scan_duration: Duration::ZERO,
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(secs.max(0.0)))
    }
}

/// Live status of an ongoing or completed scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatus {
    pub status: ScanStatusKind,
    pub scanned_combinations: u32,
    pub successful_regions: u32,
    pub total_instances: u32,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub message: String,
}

impl Default for ScanStatus {
    fn default() -> Self {
        Self {
            status: ScanStatusKind::Idle,
            scanned_combinations: 0,
            successful_regions: 0,
            total_instances: 0,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatusKind {
    Idle,
    Scanning,
    Completed,
    Error,
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
