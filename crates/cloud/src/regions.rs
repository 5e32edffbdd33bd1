// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Region enumeration: prefer the CLI's live `describe-regions`, fall back
//! to a fixed list when the CLI is unavailable or the call fails.

use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;

const DESCRIBE_REGIONS_TIMEOUT: Duration = Duration::from_secs(15);

pub async fn get_aws_regions() -> Vec<String> {
    match fetch_regions_from_cli().await {
        Ok(regions) if !regions.is_empty() => regions,
        Ok(_) => fallback_regions(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to fetch regions from CLI, using fallback list");
            fallback_regions()
        }
    }
}

#[derive(Deserialize)]
struct DescribeRegionsOutput {
    #[serde(rename = "Regions")]
    regions: Vec<RegionEntry>,
}

#[derive(Deserialize)]
struct RegionEntry {
    #[serde(rename = "RegionName")]
    region_name: String,
}

async fn fetch_regions_from_cli() -> Result<Vec<String>, String> {
    let mut cmd = Command::new("aws");
    cmd.args([
        "ec2",
        "describe-regions",
        "--all-regions",
        "--output",
        "json",
    ]);

    let output = tokio::time::timeout(DESCRIBE_REGIONS_TIMEOUT, cmd.output())
        .await
        .map_err(|_| "describe-regions timed out".to_string())?
        .map_err(|e| format!("failed to spawn aws CLI: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "aws CLI exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let parsed: DescribeRegionsOutput =
        serde_json::from_slice(&output.stdout).map_err(|e| format!("parse output: {e}"))?;
    Ok(parsed.regions.into_iter().map(|r| r.region_name).collect())
}

/// Commonly used AWS regions, used when the CLI is absent or the live
/// describe-regions call fails.
pub fn fallback_regions() -> Vec<String> {
    [
        "us-east-1",
        "us-east-2",
        "us-west-1",
        "us-west-2",
        "af-south-1",
        "ap-east-1",
        "ap-south-1",
        "ap-south-2",
        "ap-southeast-1",
        "ap-southeast-2",
        "ap-southeast-3",
        "ap-northeast-1",
        "ap-northeast-2",
        "ap-northeast-3",
        "ca-central-1",
        "eu-central-1",
        "eu-central-2",
        "eu-west-1",
        "eu-west-2",
        "eu-west-3",
        "eu-south-1",
        "eu-south-2",
        "eu-north-1",
        "me-south-1",
        "me-central-1",
        "sa-east-1",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
#[path = "regions_tests.rs"]
mod tests;
