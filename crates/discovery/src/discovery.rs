// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Full-scan and targeted-rescan orchestration: enumerates profiles and
//! regions, fans out bounded (10-way) concurrent per-(profile, region)
//! discovery tasks, and folds the results back into the [`Cache`].

use crate::error::DiscoveryError;
use aws_config::BehaviorVersion;
use ctg_cloud::identity::IdentityCache;
use ctg_cloud::{discover_instances, get_aws_regions, parse_aws_profiles, resolve_identity};
use ctg_core::{build_tree, fleet_stats, fleet_summary, FleetStats, FleetSummary, Instance, ScanResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use crate::cache::Cache;

const FULL_SCAN_DEADLINE: Duration = Duration::from_secs(10 * 60);
const TARGETED_RESCAN_DEADLINE: Duration = Duration::from_secs(2 * 60);
const MAX_CONCURRENT_TASKS: usize = 10;

pub struct Discovery {
    cache: Cache,
    tag1_key: String,
    tag2_key: String,
    instances_file: PathBuf,
}

impl Discovery {
    pub fn new(tag1_key: impl Into<String>, tag2_key: impl Into<String>, instances_file: impl Into<PathBuf>) -> Self {
        Self {
            cache: Cache::new(),
            tag1_key: tag1_key.into(),
            tag2_key: tag2_key.into(),
            instances_file: instances_file.into(),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn fleet_stats(&self) -> FleetStats {
        match self.cache.get() {
            Some(result) => fleet_stats(&result.instances),
            None => FleetStats::default(),
        }
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        match self.cache.get() {
            Some(result) => {
                let duration = format!("{:.1}s", result.scan_duration.as_secs_f64());
                fleet_summary(&result.instances, &duration)
            }
            None => FleetSummary::default(),
        }
    }

    /// Loads the persisted snapshot into the cache if it is currently
    /// empty. Mirrors the source's lazy `loadFromYAML` on cache miss.
    pub fn warm_from_snapshot(&self) {
        if self.cache.get().is_some() {
            return;
        }
        if let Ok(Some(result)) = ctg_storage::load_snapshot(&self.instances_file) {
            self.cache.put(result);
        }
    }

    /// Runs a full scan across every configured profile x region. If
    /// `force` is false and the cache holds a result younger than
    /// `ttl_seconds`, returns that cached result instead of re-scanning.
    pub async fn scan(&self, force: bool, ttl_seconds: u64) -> Result<ScanResult, DiscoveryError> {
        if !force {
            if let Some(cached) = self.cache.get() {
                if self.cache.is_fresh(ttl_seconds) {
                    return Ok(cached);
                }
            }
        }

        self.cache.try_begin_scan()?;
        let outcome = self.run_full_scan().await;
        self.cache.end_scan();
        outcome
    }

    async fn run_full_scan(&self) -> Result<ScanResult, DiscoveryError> {
        let scan_start = Instant::now();

        let profiles = parse_aws_profiles();
        if profiles.is_empty() {
            self.cache.set_status(ctg_core::ScanStatus {
                status: ctg_core::ScanStatusKind::Error,
                message: "No AWS profiles found".to_string(),
                ..Default::default()
            });
            return Err(DiscoveryError::NoProfiles);
        }

        let regions = get_aws_regions().await;
        let total_combinations = (profiles.len() * regions.len()) as u32;

        let identity_cache = Arc::new(IdentityCache::new());
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_TASKS));
        let mut tasks = Vec::with_capacity(profiles.len() * regions.len());

        for profile in &profiles {
            for region in &regions {
                let profile = profile.clone();
                let region = region.clone();
                let identity_cache = Arc::clone(&identity_cache);
                let semaphore = Arc::clone(&semaphore);
                let tag1_key = self.tag1_key.clone();
                let tag2_key = self.tag2_key.clone();

                tasks.push(tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok()?;
                    scan_one(&profile, &region, &identity_cache, &tag1_key, &tag2_key)
                        .await
                        .ok()
                }));
            }
        }

        let mut all_instances: Vec<Instance> = Vec::new();
        let mut successful_regions = 0u32;

        for task in tasks {
            let outcome = tokio::time::timeout(FULL_SCAN_DEADLINE, task).await;
            let discovered = match outcome {
                Ok(Ok(Some(discovered))) => discovered,
                _ => continue, // silently skip regions that failed, timed out, or panicked
            };
            successful_regions += 1;
            let found = discovered.len() as u32;
            all_instances.extend(discovered);
            self.cache.record_progress(1, found, total_combinations);
        }

        // Backfill instances whose profile's identity resolved after they
        // were discovered (STS failure followed by a later-cached hit).
        for inst in &mut all_instances {
            if inst.account_id.is_empty() {
                if let Some(identity) = identity_cache.get(&inst.aws_profile) {
                    if !identity.account_id.is_empty() {
                        inst.account_id = identity.account_id;
                    }
                }
            }
        }

        let tree = build_tree(&all_instances);
        let result = ScanResult {
            instances: all_instances.clone(),
            tree,
            timestamp: chrono::Utc::now(),
            scan_duration: scan_start.elapsed(),
        };

        self.cache.put(result.clone());
        self.cache.set_status(ctg_core::ScanStatus {
            status: ctg_core::ScanStatusKind::Completed,
            scanned_combinations: total_combinations,
            successful_regions,
            total_instances: all_instances.len() as u32,
            message: format!("Scan complete: {} instances found", all_instances.len()),
        });

        if let Err(err) = ctg_storage::save_snapshot(&self.instances_file, &all_instances) {
            tracing::warn!(error = %err, "failed to save instances snapshot");
        }

        Ok(result)
    }

    /// Re-scans a single (profile, region) and merges the result into the
    /// cache: existing instances for that coordinate are replaced, the
    /// tree is rebuilt, but the persisted snapshot is left untouched.
    pub async fn scan_region(&self, profile: &str, region: &str) -> Result<usize, DiscoveryError> {
        let identity_cache = IdentityCache::new();
        let discovered = tokio::time::timeout(
            TARGETED_RESCAN_DEADLINE,
            scan_one(profile, region, &identity_cache, &self.tag1_key, &self.tag2_key),
        )
        .await
        .map_err(|_| DiscoveryError::ScanFailed(format!("{profile}/{region}"), "timed out".to_string()))?
        .map_err(|err| DiscoveryError::ScanFailed(format!("{profile}/{region}"), err.to_string()))?;

        let mut current = self.cache.get().unwrap_or_else(ScanResult::empty);
        current
            .instances
            .retain(|i| i.coordinate() != (profile, region));
        let count = discovered.len();
        current.instances.extend(discovered);
        current.tree = build_tree(&current.instances);
        current.timestamp = chrono::Utc::now();
        self.cache.put(current);

        Ok(count)
    }
}

async fn scan_one(
    profile: &str,
    region: &str,
    identity_cache: &IdentityCache,
    tag1_key: &str,
    tag2_key: &str,
) -> Result<Vec<Instance>, DiscoveryError> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;

    let identity = match identity_cache.get(profile) {
        Some(identity) => identity,
        None => {
            let identity = resolve_identity(&config).await;
            identity_cache.insert(profile, identity.clone());
            identity
        }
    };

    let ec2 = aws_sdk_ec2::Client::new(&config);
    let discovered = discover_instances(
        &ec2,
        profile,
        region,
        &identity.account_id,
        &identity.account_alias,
        tag1_key,
        tag2_key,
    )
    .await
    .map_err(|err| DiscoveryError::ScanFailed(format!("{profile}/{region}"), err.to_string()))?;

    if identity.account_id.is_empty() && !discovered.owner_id.is_empty() {
        identity_cache.backfill_account_id(profile, &discovered.owner_id);
        let mut instances = discovered.instances;
        for inst in &mut instances {
            inst.account_id = discovered.owner_id.clone();
        }
        return Ok(instances);
    }

    Ok(discovered.instances)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
