// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Fleet-wide aggregates computed from a flat instance list.

use crate::instance::Instance;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetStats {
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
    pub windows: usize,
    pub rhel: usize,
    pub accounts: usize,
}

pub fn fleet_stats(instances: &[Instance]) -> FleetStats {
    let mut stats = FleetStats::default();
    let mut accounts = HashSet::new();

    for inst in instances {
        stats.total += 1;
        if inst.is_running() {
            stats.running += 1;
        }
        if inst.is_stopped() {
            stats.stopped += 1;
        }
        if inst.is_windows() {
            stats.windows += 1;
        }
        if inst.is_rhel() {
            stats.rhel += 1;
        }
        accounts.insert(inst.account_key().to_string());
    }
    stats.accounts = accounts.len();
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
    pub platforms: BTreeMap<String, usize>,
    pub accounts: Vec<AccountStats>,
    pub scan_duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStats {
    pub account_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub account_alias: String,
    pub profile: String,
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
    pub platforms: BTreeMap<String, usize>,
}

/// Platform histogram key: `os` if set, else `platform`, else `unknown`.
fn platform_key(inst: &Instance) -> String {
    if !inst.os.is_empty() {
        inst.os.clone()
    } else if !inst.platform.is_empty() {
        inst.platform.clone()
    } else {
        "unknown".to_string()
    }
}

pub fn fleet_summary(instances: &[Instance], scan_duration: &str) -> FleetSummary {
    let mut summary = FleetSummary {
        scan_duration: scan_duration.to_string(),
        ..Default::default()
    };
    let mut account_order: Vec<String> = Vec::new();

    for inst in instances {
        summary.total += 1;
        if inst.is_running() {
            summary.running += 1;
        }
        if inst.is_stopped() {
            summary.stopped += 1;
        }
        *summary.platforms.entry(platform_key(inst)).or_insert(0) += 1;

        let key = inst.account_key().to_string();
        let idx = match account_order.iter().position(|k| *k == key) {
            Some(idx) => idx,
            None => {
                account_order.push(key.clone());
                summary.accounts.push(AccountStats {
                    account_id: key,
                    account_alias: inst.account_alias.clone(),
                    profile: inst.aws_profile.clone(),
                    ..Default::default()
                });
                summary.accounts.len() - 1
            }
        };
        let acc = &mut summary.accounts[idx];
        acc.total += 1;
        if inst.is_running() {
            acc.running += 1;
        }
        if inst.is_stopped() {
            acc.stopped += 1;
        }
        *acc.platforms.entry(platform_key(inst)).or_insert(0) += 1;
        if acc.account_alias.is_empty() && !inst.account_alias.is_empty() {
            acc.account_alias = inst.account_alias.clone();
        }
    }

    summary
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod tests;
