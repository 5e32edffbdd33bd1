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
fn fleet_stats_and_summary_are_empty_with_no_scan_yet() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Discovery::new("Customer", "Environment", dir.path().join("instances.yaml"));

    assert_eq!(discovery.fleet_stats().total, 0);
    assert_eq!(discovery.fleet_summary().total, 0);
}

#[test]
fn warm_from_snapshot_loads_persisted_instances_into_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instances.yaml");
    ctg_storage::save_snapshot(&path, &[instance("i-1", "default", "us-east-1")]).unwrap();

    let discovery = Discovery::new("Customer", "Environment", &path);
    assert!(discovery.cache().get().is_none());

    discovery.warm_from_snapshot();
    let result = discovery.cache().get().unwrap();
    assert_eq!(result.instances.len(), 1);
    assert_eq!(result.instances[0].instance_id, "i-1");
}

#[test]
fn warm_from_snapshot_does_not_overwrite_an_existing_cache_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instances.yaml");
    ctg_storage::save_snapshot(&path, &[instance("i-1", "default", "us-east-1")]).unwrap();

    let discovery = Discovery::new("Customer", "Environment", &path);
    let mut preloaded = ScanResult::empty();
    preloaded.instances.push(instance("i-2", "other", "us-west-2"));
    discovery.cache().put(preloaded);

    discovery.warm_from_snapshot();
    let result = discovery.cache().get().unwrap();
    assert_eq!(result.instances.len(), 1);
    assert_eq!(result.instances[0].instance_id, "i-2");
}

#[tokio::test]
async fn scan_returns_cached_result_when_fresh_and_not_forced() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Discovery::new("Customer", "Environment", dir.path().join("instances.yaml"));

    let mut cached = ScanResult::empty();
    cached.instances.push(instance("i-1", "default", "us-east-1"));
    discovery.cache().put(cached);

    let result = discovery.scan(false, 3600).await.unwrap();
    assert_eq!(result.instances.len(), 1);
    assert!(!discovery.cache().is_scanning());
}
