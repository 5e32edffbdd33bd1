// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The forwarder runs as its own process with its own small slice of
//! environment-driven config, independent of the gateway's.

#[derive(Debug, Clone, PartialEq)]
pub struct ForwarderConfig {
    pub port: u16,
    pub port_range_start: u16,
    pub port_range_end: u16,
    pub log_dir: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ForwarderConfigError {
    #[error("port range start ({start}) must be <= end ({end})")]
    PortRangeInverted { start: u16, end: u16 },
    #[error("port range [{start}, {end}] extended with +10000 internal offset would overflow or collide with itself")]
    PortRangeOverflow { start: u16, end: u16 },
}

impl ForwarderConfig {
    pub fn load() -> Result<Self, ForwarderConfigError> {
        let cfg = Self {
            port: env_u16("PORT", 5001),
            port_range_start: env_u16("PORT_RANGE_START", 33890),
            port_range_end: env_u16("PORT_RANGE_END", 33999),
            log_dir: env_str("LOG_DIR", "logs"),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ForwarderConfigError> {
        if self.port_range_start > self.port_range_end {
            return Err(ForwarderConfigError::PortRangeInverted {
                start: self.port_range_start,
                end: self.port_range_end,
            });
        }
        let internal_start = u32::from(self.port_range_start) + 10_000;
        let internal_end = u32::from(self.port_range_end) + 10_000;
        let overlaps_external_range = internal_start <= u32::from(self.port_range_end);
        if internal_end > u32::from(u16::MAX) || overlaps_external_range {
            return Err(ForwarderConfigError::PortRangeOverflow {
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

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
