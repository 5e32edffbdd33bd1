// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;
use std::collections::HashMap;

fn inst(id: &str, profile: &str, account_id: &str, tag1: &str, tag2: &str) -> Instance {
    Instance {
        instance_id: id.into(),
        name: id.into(),
        private_ip: "10.0.0.1".into(),
        public_ip: String::new(),
        state: "running".into(),
        platform: "linux".into(),
        os: "ubuntu".into(),
        instance_type: "t3.micro".into(),
        aws_profile: profile.into(),
        aws_region: "us-east-1".into(),
        account_id: account_id.into(),
        account_alias: String::new(),
        tag1_value: tag1.into(),
        tag2_value: tag2.into(),
        launch_time: String::new(),
        ami_id: String::new(),
        instance_profile: String::new(),
        tags: HashMap::new(),
    }
}

#[test]
fn empty_tag_values_project_to_untagged() {
    let xs = vec![inst("i-aaa", "dev", "111", "", "")];
    let tree = build_tree(&xs);
    assert_eq!(tree.accounts[0].regions[0].groups[0].tag1, "Untagged");
    assert_eq!(tree.accounts[0].regions[0].groups[0].tag2, "Untagged");
}

#[test]
fn groups_by_account_region_tag_pair() {
    let xs = vec![
        inst("i-aaa", "dev", "111", "acme", "stage"),
        inst("i-bbb", "prod", "222", "acme", "prod"),
    ];
    let tree = build_tree(&xs);
    assert_eq!(tree.accounts.len(), 2);
    for account in &tree.accounts {
        assert_eq!(account.regions.len(), 1);
        assert_eq!(account.regions[0].region, "us-east-1");
    }
}

#[test]
fn flatten_is_inverse_of_build_up_to_grouping_order() {
    let xs = vec![
        inst("i-aaa", "dev", "111", "acme", "stage"),
        inst("i-bbb", "dev", "111", "acme", "stage"),
        inst("i-ccc", "dev", "111", "acme", "prod"),
    ];
    let tree = build_tree(&xs);
    let flat = tree.flatten();
    let mut want_ids: Vec<&str> = xs.iter().map(|i| i.instance_id.as_str()).collect();
    let mut got_ids: Vec<&str> = flat.iter().map(|i| i.instance_id.as_str()).collect();
    want_ids.sort();
    got_ids.sort();
    assert_eq!(want_ids, got_ids);
}

#[test]
fn instance_order_within_group_reflects_encounter_order() {
    let xs = vec![
        inst("i-aaa", "dev", "111", "acme", "stage"),
        inst("i-bbb", "dev", "111", "acme", "stage"),
    ];
    let tree = build_tree(&xs);
    let ids: Vec<&str> = tree.accounts[0].regions[0].groups[0]
        .instances
        .iter()
        .map(|i| i.instance_id.as_str())
        .collect();
    assert_eq!(ids, vec!["i-aaa", "i-bbb"]);
}

#[test]
fn account_key_falls_back_to_profile_when_account_id_empty() {
    let xs = vec![inst("i-aaa", "dev", "", "acme", "stage")];
    let tree = build_tree(&xs);
    assert_eq!(tree.accounts[0].account_id, "dev");
}

#[test]
fn empty_input_yields_empty_tree() {
    let tree = build_tree(&[]);
    assert!(tree.accounts.is_empty());
}
