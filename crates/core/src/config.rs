// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Environment-driven configuration, shared by the gateway and forwarder
//! binaries. Every option in SPEC_FULL.md §6 is genuinely overridable,
//! including cache TTL (the original program hardcoded it despite
//! documenting it as configurable).

use serde::{Deserialize, Serialize};

/// RDP presentation mode. The token formatter for `Guacamole` mode is out of
/// scope (a stable third-party contract); this type only records the
/// operator's choice so the gateway can route accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdpMode {
    Native,
    Guacamole,
}

impl RdpMode {
    fn from_env_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("guacamole") {
            RdpMode::Guacamole
        } else {
            RdpMode::Native
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub port: u16,
    pub tag1: String,
    pub tag2: String,
    pub rdp_mode: RdpMode,
    pub guac_ws_url: String,
    pub guac_crypt_secret: String,
    pub forwarder_host: String,
    pub forwarder_port: u16,
    pub port_range_start: u16,
    pub port_range_end: u16,
    pub cache_ttl_seconds: u64,
    pub instances_file: String,
    pub audit_log_file: String,
    pub log_dir: String,
}

/// Errors that reject a configuration before the gateway starts, rather
/// than letting a hazard surface at runtime.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// See SPEC_FULL.md §9 open question: the `+10000` internal-port
    /// mapping must not overflow `u16` or fold back into the external
    /// range itself.
    #[error("port range [{start}, {end}] extended with +10000 internal offset would overflow or collide with itself")]
    PortRangeOverflow { start: u16, end: u16 },
    #[error("port range start ({start}) must be <= end ({end})")]
    PortRangeInverted { start: u16, end: u16 },
}

impl GatewayConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Self {
            port: env_u16("PORT", 5000),
            tag1: env_str("TAG1", "Customer"),
            tag2: env_str("TAG2", "Environment"),
            rdp_mode: RdpMode::from_env_str(&env_str("RDP_MODE", "native")),
            guac_ws_url: env_str("GUAC_WS_URL", "ws://localhost:8080"),
            guac_crypt_secret: env_str("GUAC_CRYPT_SECRET", "cloudterm-guac-secret-key-32byte"),
            forwarder_host: env_str("SSM_FORWARDER_HOST", "ssm-forwarder"),
            forwarder_port: env_u16("SSM_FORWARDER_PORT", 5001),
            port_range_start: env_u16("PORT_RANGE_START", 33890),
            port_range_end: env_u16("PORT_RANGE_END", 33999),
            cache_ttl_seconds: env_u64("CACHE_TTL_SECONDS", 1800),
            instances_file: env_str("INSTANCES_FILE", "instances_list.yaml"),
            audit_log_file: env_str("AUDIT_LOG_FILE", "audit.jsonl"),
            log_dir: env_str("LOG_DIR", "logs"),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port_range_start > self.port_range_end {
            return Err(ConfigError::PortRangeInverted {
                start: self.port_range_start,
                end: self.port_range_end,
            });
        }
        // internal port = external + 10000; must not overflow u16, and must
        // not fold back into [start, end] itself (only possible for an
        // implausibly wide range, but cheap to reject outright).
        let internal_start = u32::from(self.port_range_start) + 10_000;
        let internal_end = u32::from(self.port_range_end) + 10_000;
        let overlaps_external_range = internal_start <= u32::from(self.port_range_end);
        if internal_end > u32::from(u16::MAX) || overlaps_external_range {
            return Err(ConfigError::PortRangeOverflow {
                start: self.port_range_start,
                end: self.port_range_end,
            });
        }
        Ok(())
    }
}

fn env_str(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn env_u16(key: &str, fallback: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn env_u64(key: &str, fallback: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
