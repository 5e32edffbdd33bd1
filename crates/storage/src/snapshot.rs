// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Persistent instance snapshot: a stable, human-readable YAML format keyed
//! by account alias (or a synthetic `AWS_Account_<id>` when alias is
//! absent) -> region -> tag1 -> tag2 -> instance list. Only a documented
//! subset of `Instance` fields round-trips; everything else is re-derived
//! (or left at its default) on load.

use chrono::{DateTime, Utc};
use ctg_core::{build_tree, Instance, ScanResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlAccountEntry {
    #[serde(default)]
    aws_profile: String,
    #[serde(default)]
    account_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    regions: BTreeMap<String, YamlRegionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlRegionEntry {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    customers: BTreeMap<String, YamlCustomerEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlCustomerEntry {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    environments: BTreeMap<String, YamlEnvironmentEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlEnvironmentEntry {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    instances: Vec<YamlInstanceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlInstanceEntry {
    name: String,
    instance_id: String,
    region: String,
    aws_profile: String,
    state: String,
    platform: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    instance_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    private_ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    public_ip: String,
}

fn account_key(inst: &Instance) -> String {
    if !inst.account_alias.is_empty() {
        inst.account_alias.clone()
    } else {
        format!("AWS_Account_{}", inst.account_id)
    }
}

fn tag_key(value: &str) -> &str {
    if value.is_empty() {
        "Untagged"
    } else {
        value
    }
}

fn to_yaml_map(instances: &[Instance]) -> BTreeMap<String, YamlAccountEntry> {
    let mut accounts: BTreeMap<String, YamlAccountEntry> = BTreeMap::new();

    for inst in instances {
        let acct = accounts.entry(account_key(inst)).or_insert_with(|| YamlAccountEntry {
            aws_profile: inst.aws_profile.clone(),
            account_id: inst.account_id.clone(),
            regions: BTreeMap::new(),
        });

        let region = acct.regions.entry(inst.aws_region.clone()).or_default();
        let customer = region
            .customers
            .entry(tag_key(&inst.tag1_value).to_string())
            .or_default();
        let environment = customer
            .environments
            .entry(tag_key(&inst.tag2_value).to_string())
            .or_default();

        environment.instances.push(YamlInstanceEntry {
            name: inst.name.clone(),
            instance_id: inst.instance_id.clone(),
            region: inst.aws_region.clone(),
            aws_profile: inst.aws_profile.clone(),
            state: inst.state.clone(),
            platform: inst.platform.clone(),
            instance_type: inst.instance_type.clone(),
            private_ip: inst.private_ip.clone(),
            public_ip: inst.public_ip.clone(),
        });
    }

    accounts
}

fn from_yaml_map(raw: BTreeMap<String, YamlAccountEntry>) -> Vec<Instance> {
    let mut instances = Vec::new();

    for (account_alias, acct) in raw {
        // A synthetic `AWS_Account_<id>` key is not a real alias.
        let alias = if account_alias.starts_with("AWS_Account_") {
            String::new()
        } else {
            account_alias
        };

        for (region, region_entry) in acct.regions {
            for (tag1, customer) in region_entry.customers {
                for (tag2, environment) in customer.environments {
                    for yi in environment.instances {
                        instances.push(Instance {
                            instance_id: yi.instance_id,
                            name: yi.name,
                            private_ip: yi.private_ip,
                            public_ip: yi.public_ip,
                            state: yi.state,
                            platform: yi.platform,
                            os: String::new(),
                            instance_type: yi.instance_type,
                            aws_profile: yi.aws_profile,
                            aws_region: region.clone(),
                            account_id: acct.account_id.clone(),
                            account_alias: alias.clone(),
                            tag1_value: if tag1 == "Untagged" { String::new() } else { tag1.clone() },
                            tag2_value: if tag2 == "Untagged" { String::new() } else { tag2.clone() },
                            launch_time: String::new(),
                            ami_id: String::new(),
                            instance_profile: String::new(),
                            tags: std::collections::HashMap::new(),
                        });
                    }
                }
            }
        }
    }

    instances
}

/// Saves `instances` to `path` atomically: write to a temp file beside the
/// target, fsync, then rename over the target. A crash mid-write never
/// corrupts the previous snapshot.
pub fn save_snapshot(path: &Path, instances: &[Instance]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_yaml::to_writer(&mut writer, &to_yaml_map(instances))?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Loads the persisted snapshot, if any. Returns `Ok(None)` when the file
/// is absent; a corrupt file is rotated to `.bak` (see
/// [`rotate_bak_path`]) and also yields `Ok(None)` rather than failing
/// startup.
pub fn load_snapshot(path: &Path) -> Result<Option<ScanResult>, SnapshotError> {
    if !path.exists() {
        return Ok(None);
    }

    let modified: DateTime<Utc> = fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::from)
        .unwrap_or_else(|_| Utc::now());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match serde_yaml::from_reader::<_, BTreeMap<String, YamlAccountEntry>>(reader) {
        Ok(raw) => {
            let instances = from_yaml_map(raw);
            let tree = build_tree(&instances);
            Ok(Some(ScanResult {
                instances,
                tree,
                timestamp: modified,
                scan_duration: std::time::Duration::ZERO,
            }))
        }
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "corrupt instance snapshot, moving to .bak and starting empty",
            );
            fs::rename(path, &bak_path)?;
            Ok(None)
        }
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Picks the next `.bak` / `.bak.N` path, rotating older backups out.
/// Keeps up to [`MAX_BAK_FILES`] backups; the oldest is dropped.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
