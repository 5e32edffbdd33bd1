// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Table of live sessions. Unlike the original source, a session removes
//! itself from the table and notifies its subscriber the moment its pty
//! reader hits EOF, instead of waiting for an explicit close.

use crate::error::TerminalError;
use crate::session::{EndedSink, OutputSink, Session};
use nix::sys::signal::Signal;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// `None` marks a session_id that has been reserved but whose process is
/// still spawning, so a second concurrent start sees the slot taken
/// instead of racing past it.
pub struct Multiplexer {
    sessions: RwLock<HashMap<String, Option<Arc<Session>>>>,
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplexer {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Launches the provider's agent CLI in start-session mode for
    /// `instance_id`, attached to a fresh pty in its own process group.
    pub async fn start_session(
        self: &Arc<Self>,
        instance_id: &str,
        session_id: &str,
        profile: &str,
        region: &str,
        on_output: OutputSink,
        on_ended: impl FnOnce(String, String) + Send + 'static,
    ) -> Result<(), TerminalError> {
        let (program, args) = ssm_command(instance_id, profile, region);
        self.spawn_session(instance_id, session_id, &program, &args, on_output, on_ended)
            .await
    }

    /// Lower-level entry point used directly by tests: spawns an arbitrary
    /// command instead of the fixed `aws ssm start-session` invocation.
    pub async fn spawn_session(
        self: &Arc<Self>,
        instance_id: &str,
        session_id: &str,
        program: &str,
        args: &[String],
        on_output: OutputSink,
        on_ended: impl FnOnce(String, String) + Send + 'static,
    ) -> Result<(), TerminalError> {
        {
            let mut sessions = self.sessions.write();
            if sessions.contains_key(session_id) {
                return Err(TerminalError::AlreadyExists(session_id.to_string()));
            }
            // Reserve the slot before the await below so a second concurrent
            // call for the same session_id sees it occupied rather than
            // racing this one to the eventual insert.
            sessions.insert(session_id.to_string(), None);
        }

        let this = Arc::clone(self);
        let ended_instance_id = instance_id.to_string();
        let ended_session_id = session_id.to_string();
        let reap: EndedSink = Box::new(move || {
            this.sessions.write().remove(&ended_session_id);
            on_ended(ended_instance_id, ended_session_id);
        });

        let session = match Session::spawn(
            instance_id.to_string(),
            session_id.to_string(),
            program,
            args,
            on_output,
            reap,
        )
        .await
        {
            Ok(session) => session,
            Err(err) => {
                self.sessions.write().remove(session_id);
                return Err(err);
            }
        };

        self.sessions.write().insert(session_id.to_string(), Some(session));
        Ok(())
    }

    pub async fn write_input(&self, session_id: &str, data: &[u8]) -> Result<(), TerminalError> {
        self.get(session_id)?.write_input(data).await
    }

    pub async fn resize_terminal(&self, session_id: &str, rows: u16, cols: u16) -> Result<(), TerminalError> {
        self.get(session_id)?.resize(rows, cols).await
    }

    pub fn send_interrupt(&self, session_id: &str) -> Result<(), TerminalError> {
        self.get(session_id)?.signal_group(Signal::SIGINT)
    }

    /// Removes the session from the table, kills its process group, and
    /// waits for the reader task to observe EOF and reap the child.
    pub async fn close_session(&self, session_id: &str) -> Result<(), TerminalError> {
        let session = self
            .sessions
            .write()
            .remove(session_id)
            .flatten()
            .ok_or_else(|| TerminalError::NotFound(session_id.to_string()))?;
        session.close().await
    }

    pub async fn close_sessions_for_client(&self, session_ids: &[String]) {
        for id in session_ids {
            if let Err(err) = self.close_session(id).await {
                tracing::debug!(session_id = %id, error = %err, "close session for disconnecting client");
            }
        }
    }

    pub async fn close_all(&self) {
        let ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        self.close_sessions_for_client(&ids).await;
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().contains_key(session_id)
    }

    fn get(&self, session_id: &str) -> Result<Arc<Session>, TerminalError> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .flatten()
            .ok_or_else(|| TerminalError::NotFound(session_id.to_string()))
    }
}

/// Builds the `aws ssm start-session` invocation for a target instance.
fn ssm_command(instance_id: &str, profile: &str, region: &str) -> (String, Vec<String>) {
    (
        "aws".to_string(),
        vec![
            "ssm".to_string(),
            "start-session".to_string(),
            "--target".to_string(),
            instance_id.to_string(),
            "--profile".to_string(),
            profile.to_string(),
            "--region".to_string(),
            region.to_string(),
        ],
    )
}

#[cfg(test)]
#[path = "multiplexer_tests.rs"]
mod tests;
