// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Single-slot store of the last completed [`ScanResult`], plus the live
//! [`ScanStatus`] of any scan in progress. A single `RwLock` protects both:
//! per §9's redesign decision, every counter increment -- not just the
//! final status snapshot -- takes the write side, closing a race present
//! in the original source where the raw counters were incremented outside
//! any lock.

use crate::error::DiscoveryError;
use ctg_core::{Instance, ScanResult, ScanStatus, ScanStatusKind};
use parking_lot::RwLock;

struct CacheInner {
    result: Option<ScanResult>,
    status: ScanStatus,
    scanning: bool,
}

pub struct Cache {
    inner: RwLock<CacheInner>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                result: None,
                status: ScanStatus::default(),
                scanning: false,
            }),
        }
    }

    pub fn get(&self) -> Option<ScanResult> {
        self.inner.read().result.clone()
    }

    pub fn put(&self, result: ScanResult) {
        self.inner.write().result = Some(result);
    }

    pub fn status(&self) -> ScanStatus {
        self.inner.read().status.clone()
    }

    pub fn is_scanning(&self) -> bool {
        self.inner.read().scanning
    }

    pub fn get_instance(&self, id: &str) -> Option<Instance> {
        self.inner
            .read()
            .result
            .as_ref()
            .and_then(|r| r.instances.iter().find(|i| i.instance_id == id).cloned())
    }

    /// `(profile, region)` for a cached instance, used by the Client
    /// Bridge to resolve a `start_session` request that omitted them.
    pub fn get_config(&self, id: &str) -> Result<(String, String), DiscoveryError> {
        self.get_instance(id)
            .map(|i| (i.aws_profile, i.aws_region))
            .ok_or_else(|| DiscoveryError::InstanceNotFound(id.to_string()))
    }

    /// Freshness check for the TTL short-circuit in a full scan: `true`
    /// when a cached result exists and is younger than `ttl_seconds`.
    pub fn is_fresh(&self, ttl_seconds: u64) -> bool {
        let guard = self.inner.read();
        match &guard.result {
            Some(result) => {
                let age = chrono::Utc::now().signed_duration_since(result.timestamp);
                age.num_seconds() >= 0 && (age.num_seconds() as u64) < ttl_seconds
            }
            None => false,
        }
    }

    /// Double-checked-lock busy guard: returns `Busy` if a scan is already
    /// running, otherwise marks scanning and resets the status.
    pub fn try_begin_scan(&self) -> Result<(), DiscoveryError> {
        if self.inner.read().scanning {
            return Err(DiscoveryError::Busy);
        }
        let mut guard = self.inner.write();
        if guard.scanning {
            return Err(DiscoveryError::Busy);
        }
        guard.scanning = true;
        guard.status = ScanStatus {
            status: ScanStatusKind::Scanning,
            message: "Starting scan...".to_string(),
            ..ScanStatus::default()
        };
        Ok(())
    }

    pub fn end_scan(&self) {
        self.inner.write().scanning = false;
    }

    pub fn set_status(&self, status: ScanStatus) {
        self.inner.write().status = status;
    }

    /// Atomically increments the in-progress counters and recomputes the
    /// status message -- the single write-lock acquisition this function
    /// takes covers both, so no reader ever observes counters that are
    /// ahead of the message or vice versa.
    pub fn record_progress(&self, successful_delta: u32, instances_in_task: u32, total_combinations: u32) {
        let mut guard = self.inner.write();
        guard.status.scanned_combinations += 1;
        guard.status.successful_regions += successful_delta;
        guard.status.total_instances += instances_in_task;
        guard.status.message = format!(
            "Scanned {}/{} combinations",
            guard.status.scanned_combinations, total_combinations
        );
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
