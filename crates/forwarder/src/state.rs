// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Process-wide forwarder state, held as an explicit value rather than
//! package-level globals: the active session table and the port
//! allocator they share.

use crate::error::ForwarderError;
use crate::port::PortAllocator;
use crate::session::ForwarderSession;
use ctg_core::{ForwarderSessionInfo, ForwarderStartResponse, ForwarderStartStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct ForwarderState {
    sessions: Arc<RwLock<HashMap<String, Arc<ForwarderSession>>>>,
    ports: PortAllocator,
}

impl ForwarderState {
    pub fn new(port_range_start: u16, port_range_end: u16) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ports: PortAllocator::new(port_range_start, port_range_end),
        }
    }

    pub async fn start_session(
        &self,
        instance_id: String,
        instance_name: String,
        aws_profile: String,
        aws_region: String,
    ) -> Result<ForwarderStartResponse, ForwarderError> {
        if instance_id.is_empty() {
            return Err(ForwarderError::MissingInstanceId);
        }

        if let Some(existing) = self.sessions.read().await.get(&instance_id) {
            return Ok(ForwarderStartResponse {
                status: ForwarderStartStatus::AlreadyRunning,
                instance_id: existing.instance_id.clone(),
                port: existing.local_port,
                instance_name: existing.instance_name.clone(),
            });
        }

        let sessions = self.sessions.clone();
        let monitor_id = instance_id.clone();
        let session = ForwarderSession::start(
            instance_id.clone(),
            instance_name.clone(),
            aws_profile,
            aws_region,
            &self.ports,
            move || {
                tokio::spawn(async move {
                    sessions.write().await.remove(&monitor_id);
                });
            },
        )
        .await?;

        let port = session.local_port;
        self.sessions.write().await.insert(instance_id.clone(), Arc::new(session));

        Ok(ForwarderStartResponse {
            status: ForwarderStartStatus::Started,
            instance_id,
            port,
            instance_name,
        })
    }

    pub async fn stop_session(&self, instance_id: &str) -> Result<(), ForwarderError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(instance_id)
            .ok_or_else(|| ForwarderError::NotFound(instance_id.to_string()))?;

        session.kill().await;
        self.ports.free(session.local_port);
        Ok(())
    }

    pub async fn list_sessions(&self) -> Vec<ForwarderSessionInfo> {
        self.sessions.read().await.values().map(|s| s.info()).collect()
    }

    pub async fn health(&self) -> (usize, usize) {
        (self.sessions.read().await.len(), self.ports.allocated_count())
    }

    /// Kills every active session and waits for each monitor task to
    /// observe its agent process exit before returning.
    pub async fn shutdown(&self) {
        let sessions: Vec<Arc<ForwarderSession>> = {
            let mut table = self.sessions.write().await;
            table.drain().map(|(_, session)| session).collect()
        };

        for session in &sessions {
            session.kill().await;
            self.ports.free(session.local_port);
        }

        for session in sessions {
            match Arc::try_unwrap(session) {
                Ok(session) => {
                    if let Err(err) = session.monitor.await {
                        tracing::warn!(error = %err, "forwarder monitor task panicked during shutdown");
                    }
                }
                Err(session) => {
                    tracing::warn!(instance_id = %session.instance_id, "session still referenced elsewhere at shutdown");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
