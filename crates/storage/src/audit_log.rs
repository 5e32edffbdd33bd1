// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Append-only audit log: one JSON object per line, a single mutex
//! serializing appends (mirroring the Cache's single-writer discipline).

use ctg_core::AuditEvent;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct AuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Appends one event as a single JSON line. Logged best-effort: a
    /// caller that cares about the failure reason gets one, but a logging
    /// failure never aborts the action being audited.
    pub fn append(&self, event: &AuditEvent) -> Result<(), AuditLogError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        Ok(())
    }

    /// Returns up to `limit` events, newest first, skipping the first
    /// `offset` (from the newest end). Reads the whole file each call --
    /// acceptable at the audit log's expected scale, not indexed.
    pub fn recent(&self, limit: usize, offset: usize) -> Vec<AuditEvent> {
        let _guard = self.write_lock.lock();
        let Ok(data) = std::fs::read(&self.path) else {
            return Vec::new();
        };
        recent_from(&data, limit, offset)
    }
}

fn recent_from(data: &[u8], limit: usize, offset: usize) -> Vec<AuditEvent> {
    let mut lines: Vec<&[u8]> = data.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
    lines.reverse();

    if offset >= lines.len() {
        return Vec::new();
    }
    let end = (offset + limit).min(lines.len());

    lines[offset..end]
        .iter()
        .filter_map(|line| serde_json::from_slice(line).ok())
        .collect()
}

#[cfg(test)]
#[path = "audit_log_tests.rs"]
mod tests;
