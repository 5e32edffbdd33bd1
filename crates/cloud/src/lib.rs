// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ctg-cloud: the cloud-provider adapter layer. Wraps the EC2/STS/IAM/SSM
//! SDK clients behind the pure shapes in `ctg-core`, and owns everything
//! that touches the local AWS credentials file, the `aws` CLI, or the
//! network: profile/region enumeration, account identity resolution,
//! instance discovery, and the agent-channel shell command helper.

pub mod discover;
pub mod error;
pub mod identity;
pub mod profiles;
pub mod quoting;
pub mod regions;
pub mod ssm;

pub use discover::{discover_instances, DiscoveredInstances};
pub use error::CloudError;
pub use identity::{resolve_identity, AccountIdentity, IdentityCache};
pub use profiles::parse_aws_profiles;
pub use quoting::{posix_quote, powershell_quote};
pub use regions::{fallback_regions, get_aws_regions};
pub use ssm::{document_name_for_platform, ssm_exec_output, POLL_INTERVAL};
