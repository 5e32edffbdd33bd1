// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The shape of one append-only audit record. Persistence lives in
//! `ctg-storage`; this module owns only the data shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl AuditEvent {
    /// Build an event stamped with the current UTC time, per §6.
    pub fn now(action: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            instance_id: None,
            instance_name: None,
            profile: None,
            region: None,
            details: None,
        }
    }

    pub fn with_instance(mut self, instance_id: impl Into<String>, instance_name: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self.instance_name = Some(instance_name.into());
        self
    }

    pub fn with_profile_region(mut self, profile: impl Into<String>, region: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self.region = Some(region.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
