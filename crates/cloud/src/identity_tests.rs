// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn empty_identity_reports_empty() {
    assert!(AccountIdentity::default().is_empty());
}

#[test]
fn identity_with_account_id_is_not_empty() {
    let identity = AccountIdentity {
        account_id: "123456789012".into(),
        account_alias: String::new(),
    };
    assert!(!identity.is_empty());
}

#[test]
fn cache_round_trips_by_profile() {
    let cache = IdentityCache::new();
    assert!(cache.get("dev").is_none());
    cache.insert(
        "dev",
        AccountIdentity {
            account_id: "111".into(),
            account_alias: "dev-account".into(),
        },
    );
    assert_eq!(cache.get("dev").unwrap().account_id, "111");
    assert!(cache.get("prod").is_none());
}

#[test]
fn backfill_only_fills_empty_account_id() {
    let cache = IdentityCache::new();
    cache.insert("dev", AccountIdentity::default());
    cache.backfill_account_id("dev", "999");
    assert_eq!(cache.get("dev").unwrap().account_id, "999");

    cache.backfill_account_id("dev", "should-not-overwrite");
    assert_eq!(cache.get("dev").unwrap().account_id, "999");
}

#[test]
fn backfill_on_unknown_profile_is_a_no_op() {
    let cache = IdentityCache::new();
    cache.backfill_account_id("ghost", "123");
    assert!(cache.get("ghost").is_none());
}
