// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The 4-level hierarchical projection: Account -> Region -> (Tag1, Tag2) -> Instances.

use crate::instance::Instance;
use serde::{Deserialize, Serialize};

const UNTAGGED: &str = "Untagged";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceTree {
    pub accounts: Vec<AccountNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    pub account_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub account_alias: String,
    pub profile: String,
    pub regions: Vec<RegionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNode {
    pub region: String,
    pub groups: Vec<TagGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub tag1: String,
    pub tag2: String,
    pub instances: Vec<Instance>,
}

fn tag_key(v: &str) -> &str {
    if v.is_empty() {
        UNTAGGED
    } else {
        v
    }
}

/// Build the 4-level tree from a flat instance list. Deterministic given a
/// fixed input order: instances within a (tag1, tag2) group preserve
/// encounter order. Account/region/group nodes appear in first-seen order.
pub fn build_tree(instances: &[Instance]) -> InstanceTree {
    let mut accounts: Vec<AccountNode> = Vec::new();

    for inst in instances {
        let account_key = inst.account_key().to_string();
        let account_idx = match accounts.iter().position(|a| a.account_id == account_key) {
            Some(idx) => idx,
            None => {
                accounts.push(AccountNode {
                    account_id: account_key.clone(),
                    account_alias: inst.account_alias.clone(),
                    profile: inst.aws_profile.clone(),
                    regions: Vec::new(),
                });
                accounts.len() - 1
            }
        };
        let account = &mut accounts[account_idx];
        if account.account_alias.is_empty() && !inst.account_alias.is_empty() {
            account.account_alias = inst.account_alias.clone();
        }

        let region_idx = match account
            .regions
            .iter()
            .position(|r| r.region == inst.aws_region)
        {
            Some(idx) => idx,
            None => {
                account.regions.push(RegionNode {
                    region: inst.aws_region.clone(),
                    groups: Vec::new(),
                });
                account.regions.len() - 1
            }
        };
        let region = &mut account.regions[region_idx];

        let t1 = tag_key(&inst.tag1_value).to_string();
        let t2 = tag_key(&inst.tag2_value).to_string();
        let group_idx = match region
            .groups
            .iter()
            .position(|g| g.tag1 == t1 && g.tag2 == t2)
        {
            Some(idx) => idx,
            None => {
                region.groups.push(TagGroup {
                    tag1: t1,
                    tag2: t2,
                    instances: Vec::new(),
                });
                region.groups.len() - 1
            }
        };

        region.groups[group_idx].instances.push(inst.clone());
    }

    InstanceTree { accounts }
}

impl InstanceTree {
    /// Flatten back into a list of instances, in tree traversal order. Used
    /// to check `build_tree(xs).flatten() == xs` up to grouping order.
    pub fn flatten(&self) -> Vec<Instance> {
        let mut out = Vec::new();
        for account in &self.accounts {
            for region in &account.regions {
                for group in &region.groups {
                    out.extend(group.instances.iter().cloned());
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
