// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! A single forwarder session: the two child processes (agent-channel
//! port-forwarding session and TCP relay) that together tunnel one
//! instance's remote-desktop port to a local one, plus the supervisor
//! task that waits on the agent-channel process.

use crate::error::ForwarderError;
use crate::port::PortAllocator;
use ctg_core::ForwarderSessionInfo;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

const TUNNEL_SETTLE: Duration = Duration::from_secs(2);

pub struct ForwarderSession {
    pub instance_id: String,
    pub instance_name: String,
    pub local_port: u16,
    pub aws_profile: String,
    pub aws_region: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// The agent-channel `Child` lives entirely inside `monitor`'s task, not
    /// behind a shared lock: a lock held across that task's `wait()` would
    /// starve `kill()` for as long as the tunnel stays up. Killing the
    /// process goes through this pid instead.
    agent_pid: i32,
    relay_process: AsyncMutex<Child>,
    /// Stored rather than fire-and-forget: shutdown awaits this handle so
    /// a teardown only completes once the monitor has actually observed
    /// the agent process exit.
    pub monitor: JoinHandle<()>,
}

impl ForwarderSession {
    pub fn info(&self) -> ForwarderSessionInfo {
        ForwarderSessionInfo {
            instance_id: self.instance_id.clone(),
            instance_name: self.instance_name.clone(),
            local_port: self.local_port,
            aws_profile: self.aws_profile.clone(),
            aws_region: self.aws_region.clone(),
            started_at: self.started_at.to_rfc3339(),
        }
    }

    /// Launches the agent-channel port-forwarding session and the TCP
    /// relay in front of it. On either launch failing, tears down
    /// whatever succeeded and frees the port before returning.
    pub async fn start(
        instance_id: String,
        instance_name: String,
        aws_profile: String,
        aws_region: String,
        ports: &PortAllocator,
        on_agent_exit: impl FnOnce() + Send + 'static,
    ) -> Result<Self, ForwarderError> {
        let local_port = ports.allocate()?;
        let internal_port = PortAllocator::internal_port(local_port);

        let mut agent_child = match spawn_agent_channel(&instance_id, &aws_profile, &aws_region, internal_port) {
            Ok(child) => child,
            Err(err) => {
                ports.free(local_port);
                return Err(err);
            }
        };
        let agent_pid = match agent_child.id() {
            Some(pid) => pid as i32,
            None => {
                ports.free(local_port);
                return Err(ForwarderError::MissingPid("aws ssm start-session"));
            }
        };

        tokio::time::sleep(TUNNEL_SETTLE).await;

        let relay_process = match spawn_relay(local_port, internal_port) {
            Ok(child) => child,
            Err(err) => {
                let _ = agent_child.start_kill();
                let _ = agent_child.wait().await;
                ports.free(local_port);
                return Err(err);
            }
        };

        let monitor_port = local_port;
        let monitor_instance = instance_id.clone();
        let monitor = tokio::spawn(async move {
            match agent_child.wait().await {
                Ok(status) => {
                    tracing::info!(instance_id = %monitor_instance, port = monitor_port, ?status, "agent channel process exited")
                }
                Err(err) => {
                    tracing::warn!(instance_id = %monitor_instance, error = %err, "failed to wait on agent channel process")
                }
            }
            on_agent_exit();
        });

        Ok(Self {
            instance_id,
            instance_name,
            local_port,
            aws_profile,
            aws_region,
            started_at: chrono::Utc::now(),
            agent_pid,
            relay_process: AsyncMutex::new(relay_process),
            monitor,
        })
    }

    /// Kills the relay first, then the agent channel, matching the stop
    /// order of the process this replaces. Signals the agent by pid rather
    /// than awaiting its exit, so this returns even while the monitor task
    /// owns the `Child` and is blocked inside its `wait()`; the monitor
    /// still observes the exit and fires `on_agent_exit` on its own.
    pub async fn kill(&self) {
        let mut relay = self.relay_process.lock().await;
        let _ = relay.start_kill();
        let _ = relay.wait().await;
        if let Err(err) = signal::kill(Pid::from_raw(self.agent_pid), Signal::SIGKILL) {
            tracing::debug!(instance_id = %self.instance_id, pid = self.agent_pid, error = %err, "agent channel process already gone");
        }
    }

    /// Builds a session backed by harmless placeholder processes, so
    /// tests can exercise session bookkeeping without `aws`/`socat`.
    #[cfg(test)]
    pub(crate) fn test_instance(instance_id: &str, local_port: u16) -> Self {
        fn harmless_child() -> Child {
            Command::new("sh")
                .args(["-c", "sleep 30"])
                .kill_on_drop(true)
                .spawn()
                .expect("sh must be available in the test environment")
        }

        let mut agent_child = harmless_child();
        let agent_pid = agent_child.id().expect("just-spawned child must report a pid") as i32;
        let monitor = tokio::spawn(async move {
            let _ = agent_child.wait().await;
        });

        Self {
            instance_id: instance_id.to_string(),
            instance_name: format!("{instance_id}-name"),
            local_port,
            aws_profile: "default".to_string(),
            aws_region: "us-east-1".to_string(),
            started_at: chrono::Utc::now(),
            agent_pid,
            relay_process: AsyncMutex::new(harmless_child()),
            monitor,
        }
    }
}

fn spawn_agent_channel(instance_id: &str, profile: &str, region: &str, internal_port: u16) -> Result<Child, ForwarderError> {
    Command::new("aws")
        .args([
            "ssm",
            "start-session",
            "--target",
            instance_id,
            "--document-name",
            "AWS-StartPortForwardingSession",
            "--parameters",
            &format!("portNumber=3389,localPortNumber={internal_port}"),
            "--profile",
            profile,
            "--region",
            region,
        ])
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| ForwarderError::Spawn("aws ssm start-session", err))
}

fn spawn_relay(external_port: u16, internal_port: u16) -> Result<Child, ForwarderError> {
    Command::new("socat")
        .args([
            format!("TCP-LISTEN:{external_port},fork,reuseaddr,bind=0.0.0.0"),
            format!("TCP:127.0.0.1:{internal_port}"),
        ])
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| ForwarderError::Spawn("socat", err))
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
