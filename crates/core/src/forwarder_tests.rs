// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn start_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ForwarderStartStatus::AlreadyRunning).unwrap(),
        "\"already_running\""
    );
}

#[test]
fn forwarder_session_info_roundtrips() {
    let info = ForwarderSessionInfo {
        instance_id: "i-aaa".into(),
        instance_name: "web-1".into(),
        local_port: 33890,
        aws_profile: "dev".into(),
        aws_region: "us-east-1".into(),
        started_at: "2026-07-26T00:00:00Z".into(),
    };
    let json = serde_json::to_string(&info).unwrap();
    let back: ForwarderSessionInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}
