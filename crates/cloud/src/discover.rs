// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Per-(profile, region) instance enumeration: page through `DescribeInstances`
//! and materialize each reservation's instances into [`ctg_core::Instance`].

use crate::error::CloudError;
use ctg_core::instance::detect_platform_and_os;
use ctg_core::{Instance, InstanceState};
use std::collections::HashMap;

/// Result of enumerating one (profile, region): the parsed instances and
/// the first reservation owner id seen, used to backfill `account_id` when
/// STS identity resolution failed for this profile.
pub struct DiscoveredInstances {
    pub instances: Vec<Instance>,
    pub owner_id: String,
}

pub async fn discover_instances(
    client: &aws_sdk_ec2::Client,
    profile: &str,
    region: &str,
    account_id: &str,
    account_alias: &str,
    tag1_key: &str,
    tag2_key: &str,
) -> Result<DiscoveredInstances, CloudError> {
    let mut instances = Vec::new();
    let mut owner_id = String::new();

    let mut pages = client.describe_instances().into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| CloudError::DescribeInstances(e.to_string()))?;
        for reservation in page.reservations() {
            if owner_id.is_empty() {
                if let Some(id) = reservation.owner_id() {
                    owner_id = id.to_string();
                }
            }
            for sdk_instance in reservation.instances() {
                instances.push(parse_instance(
                    sdk_instance,
                    profile,
                    region,
                    account_id,
                    account_alias,
                    tag1_key,
                    tag2_key,
                ));
            }
        }
    }

    Ok(DiscoveredInstances { instances, owner_id })
}

fn parse_instance(
    inst: &aws_sdk_ec2::types::Instance,
    profile: &str,
    region: &str,
    account_id: &str,
    account_alias: &str,
    tag1_key: &str,
    tag2_key: &str,
) -> Instance {
    let mut name = String::new();
    let mut tag1_value = String::new();
    let mut tag2_value = String::new();
    let mut tags = HashMap::new();

    for tag in inst.tags() {
        let key = tag.key().unwrap_or_default();
        let value = tag.value().unwrap_or_default();
        tags.insert(key.to_string(), value.to_string());
        if key == "Name" {
            name = value.to_string();
        } else if key == tag1_key {
            tag1_value = value.to_string();
        } else if key == tag2_key {
            tag2_value = value.to_string();
        }
    }

    let platform_attr = inst.platform().map(|p| p.as_str()).unwrap_or_default();
    let platform_details = inst.platform_details().unwrap_or_default();
    let (platform, os) = detect_platform_and_os(platform_attr, platform_details);

    let state = inst
        .state()
        .and_then(|s| s.name())
        .map(|n| InstanceState::from_provider_str(n.as_str()).as_str().to_string())
        .unwrap_or_default();

    let launch_time = inst
        .launch_time()
        .and_then(|t| t.fmt(aws_smithy_types::date_time::Format::DateTime).ok())
        .unwrap_or_default();

    let instance_profile = inst
        .iam_instance_profile()
        .and_then(|p| p.arn())
        .unwrap_or_default()
        .to_string();

    Instance {
        instance_id: inst.instance_id().unwrap_or_default().to_string(),
        name,
        private_ip: inst.private_ip_address().unwrap_or_default().to_string(),
        public_ip: inst.public_ip_address().unwrap_or_default().to_string(),
        state,
        platform: platform.as_str().to_string(),
        os,
        instance_type: inst
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        aws_profile: profile.to_string(),
        aws_region: region.to_string(),
        account_id: account_id.to_string(),
        account_alias: account_alias.to_string(),
        tag1_value,
        tag2_value,
        launch_time,
        ami_id: inst.image_id().unwrap_or_default().to_string(),
        instance_profile,
        tags,
    }
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
