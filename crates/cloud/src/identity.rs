// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Account identity resolution (account id + alias), cached per profile so
//! a full scan issues at most one STS + IAM round trip per profile rather
//! than once per (profile, region) combination.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Account id and (if the caller has `iam:ListAccountAliases`) the
/// human-friendly alias. Either field may be empty when the corresponding
/// call fails -- identity resolution never aborts a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountIdentity {
    pub account_id: String,
    pub account_alias: String,
}

impl AccountIdentity {
    pub fn is_empty(&self) -> bool {
        self.account_id.is_empty() && self.account_alias.is_empty()
    }
}

/// Resolves account id (via STS `GetCallerIdentity`) and alias (via IAM
/// `ListAccountAliases`) for the credentials loaded into `config`. Each
/// call is independently best-effort: a failure leaves that field empty
/// rather than failing the whole resolution.
pub async fn resolve_identity(config: &aws_config::SdkConfig) -> AccountIdentity {
    let sts = aws_sdk_sts::Client::new(config);
    let iam = aws_sdk_iam::Client::new(config);

    let account_id = match sts.get_caller_identity().send().await {
        Ok(output) => output.account().unwrap_or_default().to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "sts:GetCallerIdentity failed");
            String::new()
        }
    };

    let account_alias = match iam.list_account_aliases().send().await {
        Ok(output) => output
            .account_aliases()
            .first()
            .cloned()
            .unwrap_or_default(),
        Err(err) => {
            tracing::debug!(error = %err, "iam:ListAccountAliases failed");
            String::new()
        }
    };

    AccountIdentity {
        account_id,
        account_alias,
    }
}

/// Per-profile memoization of [`resolve_identity`], so concurrent scan
/// tasks for the same profile (different regions) converge on a single
/// STS/IAM round trip.
#[derive(Default)]
pub struct IdentityCache {
    inner: Mutex<HashMap<String, AccountIdentity>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, profile: &str) -> Option<AccountIdentity> {
        self.inner.lock().get(profile).cloned()
    }

    pub fn insert(&self, profile: &str, identity: AccountIdentity) {
        self.inner.lock().insert(profile.to_string(), identity);
    }

    /// Backfills `account_id` for a profile whose STS call failed, using
    /// the reservation owner id discovered during instance enumeration.
    pub fn backfill_account_id(&self, profile: &str, owner_id: &str) {
        let mut guard = self.inner.lock();
        if let Some(identity) = guard.get_mut(profile) {
            if identity.account_id.is_empty() {
                identity.account_id = owner_id.to_string();
            }
        }
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
