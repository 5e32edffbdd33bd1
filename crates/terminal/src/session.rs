// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! A single pseudo-terminal-backed session: the cloud-agent process, its
//! pty master, and the reader task that copies output until EOF.

use crate::error::TerminalError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use pty_process::{Pty, Size};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, WriteHalf};
use tokio::sync::{Mutex as AsyncMutex, Notify};

const READ_CHUNK: usize = 4096;

/// Called with each chunk of pty output, in the order it was produced.
pub type OutputSink = Arc<dyn Fn(Vec<u8>) + Send + Sync>;

/// Called exactly once, when the reader reaps the child after EOF.
pub type EndedSink = Box<dyn FnOnce() + Send>;

pub struct Session {
    pub instance_id: String,
    pub session_id: String,
    writer: AsyncMutex<WriteHalf<Pty>>,
    pid: i32,
    reaped: Notify,
}

impl Session {
    /// Spawns `program` with `args` attached to a fresh pty, in its own
    /// session (so its pid doubles as its process-group id). Spawns a
    /// reader task that streams output to `on_output` and, on EOF, reaps
    /// the child, invokes `on_ended`, and returns.
    pub async fn spawn(
        instance_id: String,
        session_id: String,
        program: &str,
        args: &[String],
        on_output: OutputSink,
        on_ended: EndedSink,
    ) -> Result<Arc<Self>, TerminalError> {
        let pty = Pty::new().map_err(TerminalError::PtySpawn)?;
        pty.resize(Size::new(24, 80)).map_err(TerminalError::PtySpawn)?;
        let pts = pty.pts().map_err(TerminalError::PtySpawn)?;

        let mut cmd = pty_process::Command::new(program);
        cmd.args(args);
        let mut child = cmd.spawn(&pts).map_err(TerminalError::PtySpawn)?;
        let pid = child.id().ok_or_else(|| {
            TerminalError::PtySpawn(std::io::Error::other("child exited before reporting a pid"))
        })? as i32;

        let (mut reader, writer) = tokio::io::split(pty);
        let session = Arc::new(Self {
            instance_id: instance_id.clone(),
            session_id: session_id.clone(),
            writer: AsyncMutex::new(writer),
            pid,
            reaped: Notify::new(),
        });

        let reader_session = Arc::clone(&session);
        tokio::spawn(async move {
            let mut buf = [0u8; READ_CHUNK];
            loop {
                match reader.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => on_output(buf[..n].to_vec()),
                    Err(err) => {
                        tracing::debug!(session_id = %session_id, error = %err, "pty read loop ended");
                        break;
                    }
                }
            }
            let _ = child.wait().await;
            reader_session.reaped.notify_one();
            on_ended();
        });

        Ok(session)
    }

    pub async fn write_input(&self, data: &[u8]) -> Result<(), TerminalError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(|_| TerminalError::Closed(self.session_id.clone()))
    }

    pub async fn resize(&self, rows: u16, cols: u16) -> Result<(), TerminalError> {
        let writer = self.writer.lock().await;
        writer
            .get_ref()
            .resize(Size::new(rows, cols))
            .map_err(|_| TerminalError::Closed(self.session_id.clone()))
    }

    /// Sends a signal to the whole process group (negative pid).
    pub fn signal_group(&self, sig: Signal) -> Result<(), TerminalError> {
        signal::kill(Pid::from_raw(-self.pid), sig).map_err(TerminalError::Signal)
    }

    /// Kills the process group and waits for the reader task to observe
    /// EOF and reap the child.
    pub async fn close(&self) -> Result<(), TerminalError> {
        self.signal_group(Signal::SIGKILL)?;
        self.reaped.notified().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
