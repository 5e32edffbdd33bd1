// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn fallback_list_contains_common_regions() {
    let regions = fallback_regions();
    assert!(regions.contains(&"us-east-1".to_string()));
    assert!(regions.contains(&"eu-west-1".to_string()));
    assert!(regions.contains(&"ap-southeast-2".to_string()));
}

#[test]
fn fallback_list_has_no_duplicates() {
    let regions = fallback_regions();
    let mut sorted = regions.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), regions.len());
}

#[test]
fn describe_regions_output_parses_region_names() {
    let json = r#"{"Regions":[{"RegionName":"us-east-1"},{"RegionName":"sa-east-1"}]}"#;
    let parsed: DescribeRegionsOutput = serde_json::from_str(json).unwrap();
    let names: Vec<_> = parsed.regions.into_iter().map(|r| r.region_name).collect();
    assert_eq!(names, vec!["us-east-1", "sa-east-1"]);
}
