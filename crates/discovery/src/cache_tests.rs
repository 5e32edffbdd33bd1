// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;
use ctg_core::Instance;
use std::collections::HashMap;

fn instance(id: &str, profile: &str, region: &str) -> Instance {
    Instance {
        instance_id: id.into(),
        name: String::new(),
        private_ip: String::new(),
        public_ip: String::new(),
        state: "running".into(),
        platform: "linux".into(),
        os: "linux".into(),
        instance_type: String::new(),
        aws_profile: profile.into(),
        aws_region: region.into(),
        account_id: String::new(),
        account_alias: String::new(),
        tag1_value: String::new(),
        tag2_value: String::new(),
        launch_time: String::new(),
        ami_id: String::new(),
        instance_profile: String::new(),
        tags: HashMap::new(),
    }
}

#[test]
fn empty_cache_has_no_result_and_is_idle() {
    let cache = Cache::new();
    assert!(cache.get().is_none());
    assert_eq!(cache.status().status, ctg_core::ScanStatusKind::Idle);
    assert!(!cache.is_scanning());
}

#[test]
fn put_then_get_instance_and_config() {
    let cache = Cache::new();
    let mut result = ScanResult::empty();
    result.instances.push(instance("i-1", "default", "us-east-1"));
    cache.put(result);

    let found = cache.get_instance("i-1").unwrap();
    assert_eq!(found.instance_id, "i-1");

    let (profile, region) = cache.get_config("i-1").unwrap();
    assert_eq!(profile, "default");
    assert_eq!(region, "us-east-1");

    assert!(cache.get_instance("missing").is_none());
    assert!(cache.get_config("missing").is_err());
}

#[test]
fn begin_scan_rejects_concurrent_start() {
    let cache = Cache::new();
    cache.try_begin_scan().unwrap();
    assert!(cache.is_scanning());
    assert!(matches!(cache.try_begin_scan(), Err(DiscoveryError::Busy)));
    cache.end_scan();
    assert!(!cache.is_scanning());
    assert!(cache.try_begin_scan().is_ok());
}

#[test]
fn record_progress_accumulates_counters_and_message() {
    let cache = Cache::new();
    cache.try_begin_scan().unwrap();
    cache.record_progress(1, 3, 10);
    cache.record_progress(1, 2, 10);

    let status = cache.status();
    assert_eq!(status.scanned_combinations, 2);
    assert_eq!(status.successful_regions, 2);
    assert_eq!(status.total_instances, 5);
    assert_eq!(status.message, "Scanned 2/10 combinations");
}

#[test]
fn freshness_respects_ttl() {
    let cache = Cache::new();
    assert!(!cache.is_fresh(60));
    cache.put(ScanResult::empty());
    assert!(cache.is_fresh(60));
    assert!(!cache.is_fresh(0));
}
