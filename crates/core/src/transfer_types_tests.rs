// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn instance_metrics_defaults_to_all_zero() {
    let m = InstanceMetrics::default();
    assert_eq!(m.cpu_count, 0);
    assert_eq!(m.uptime, "");
}

#[test]
fn broadcast_result_omits_error_field_when_successful() {
    let result = BroadcastResult {
        instance_id: "i-1".to_string(),
        name: "web-1".to_string(),
        output: "ok".to_string(),
        error: String::new(),
        success: true,
    };
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("error").is_none());
}
