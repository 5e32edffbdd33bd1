// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn scan_result_empty_has_no_instances_and_zero_duration() {
    let r = ScanResult::empty();
    assert!(r.instances.is_empty());
    assert_eq!(r.scan_duration, Duration::ZERO);
}

#[test]
fn scan_result_serde_roundtrips_duration() {
    let mut r = ScanResult::empty();
    r.scan_duration = Duration::from_millis(1500);
    let json = serde_json::to_string(&r).unwrap();
    let back: ScanResult = serde_json::from_str(&json).unwrap();
    assert!((back.scan_duration.as_secs_f64() - 1.5).abs() < 1e-9);
}

#[test]
fn scan_status_default_is_idle_and_zeroed() {
    let s = ScanStatus::default();
    assert_eq!(s.status, ScanStatusKind::Idle);
    assert_eq!(s.scanned_combinations, 0);
    assert_eq!(s.total_instances, 0);
}

#[test]
fn scan_status_kind_serializes_lowercase() {
    let json = serde_json::to_string(&ScanStatusKind::Scanning).unwrap();
    assert_eq!(json, "\"scanning\"");
}
