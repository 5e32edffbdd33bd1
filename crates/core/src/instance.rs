// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! A single discovered compute node and its derived fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle state of an instance as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Running,
    Stopped,
    #[serde(other)]
    Other,
}

impl InstanceState {
    pub fn from_provider_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "running" => InstanceState::Running,
            "stopped" => InstanceState::Stopped,
            _ => InstanceState::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Running => "running",
            InstanceState::Stopped => "stopped",
            InstanceState::Other => "other",
        }
    }
}

/// Platform family, derived from the provider's platform attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

/// Derive (platform, os) from the provider's raw platform attribute and
/// platform-details string, per the priority rules in SPEC_FULL.md §4.C.
pub fn detect_platform_and_os(platform_attr: &str, platform_details: &str) -> (Platform, String) {
    let details_lower = platform_details.to_ascii_lowercase();
    let is_windows =
        platform_attr.eq_ignore_ascii_case("windows") || details_lower.contains("windows");

    if is_windows {
        return (Platform::Windows, "windows".to_string());
    }

    let os = if details_lower.contains("red hat") {
        "rhel"
    } else if details_lower.contains("suse") {
        "suse"
    } else if details_lower.contains("ubuntu") {
        "ubuntu"
    } else if details_lower.contains("amazon") {
        "amazon-linux"
    } else {
        "linux"
    };

    (Platform::Linux, os.to_string())
}

/// A discovered compute node. Uniquely identified by `instance_id`;
/// `(aws_profile, aws_region)` is its discovery coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub instance_id: String,
    pub name: String,
    pub private_ip: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub public_ip: String,
    pub state: String,
    /// "linux" or "windows"
    pub platform: String,
    pub os: String,
    pub instance_type: String,
    pub aws_profile: String,
    pub aws_region: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub account_alias: String,
    pub tag1_value: String,
    pub tag2_value: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub launch_time: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub ami_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub instance_profile: String,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub tags: HashMap<String, String>,
}

impl Instance {
    /// Coordinate an instance was discovered at: (profile, region).
    pub fn coordinate(&self) -> (&str, &str) {
        (&self.aws_profile, &self.aws_region)
    }

    /// Account grouping key: accountID if present, else profile.
    pub fn account_key(&self) -> &str {
        if self.account_id.is_empty() {
            &self.aws_profile
        } else {
            &self.account_id
        }
    }

    pub fn is_windows(&self) -> bool {
        self.platform.eq_ignore_ascii_case("windows")
    }

    pub fn is_rhel(&self) -> bool {
        self.os.eq_ignore_ascii_case("rhel")
    }

    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }

    pub fn is_stopped(&self) -> bool {
        self.state.eq_ignore_ascii_case("stopped")
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
