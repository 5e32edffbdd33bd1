// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! The Client Bridge: one WebSocket connection per browser tab, multiplexing
//! any number of terminal sessions over it.
//!
//! Frames are a tagged enum rather than an untyped payload -- replacing the
//! source's `interface{}`-typed `WSMessage.Payload` with a shape serde can
//! validate on the way in and the compiler can exhaustively match on the
//! way out.

use crate::state::{ssm_client, AppState};
use axum::extract::ws::{Message, WebSocket};
use ctg_core::AuditEvent;
use ctg_terminal::OutputSink;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex as SyncMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    StartSession {
        instance_id: String,
        session_id: String,
        #[serde(default)]
        profile: Option<String>,
        #[serde(default)]
        region: Option<String>,
    },
    TerminalInput {
        session_id: String,
        input: String,
    },
    TerminalResize {
        session_id: String,
        rows: u16,
        cols: u16,
    },
    TerminalInterrupt {
        session_id: String,
    },
    CloseSession {
        session_id: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    TerminalOutput {
        instance_id: String,
        session_id: String,
        output: String,
    },
    SessionStarted {
        instance_id: String,
        session_id: String,
    },
    SessionError {
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        error: String,
    },
    SessionEnded {
        instance_id: String,
        session_id: String,
    },
}

/// One writer task per connection owns the socket's send half outright, so
/// every frame -- terminal output, acks, errors -- is written in exactly
/// the order it's handed to this channel. Replaces a per-chunk-spawn fan-in
/// that raced for a shared lock and could reorder a session's own output.
type FrameSender = mpsc::UnboundedSender<ServerFrame>;

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sink, mut stream) = socket.split();
    let (frame_tx, frame_rx): (FrameSender, _) = mpsc::unbounded_channel();
    tokio::spawn(run_writer(sink, frame_rx));

    let client_sessions: Arc<SyncMutex<Vec<String>>> = Arc::new(SyncMutex::new(Vec::new()));

    while let Some(msg) = stream.next().await {
        let Ok(msg) = msg else { break };
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let frame: ClientFrame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(err) => {
                emit(&frame_tx, ServerFrame::SessionError {
                    session_id: None,
                    error: format!("malformed frame: {err}"),
                });
                continue;
            }
        };

        handle_frame(frame, &state, &frame_tx, &client_sessions).await;
    }

    let ids: Vec<String> = client_sessions.lock().clone();
    state.sessions.close_sessions_for_client(&ids).await;
}

/// Drains `rx` strictly in receive order and writes each frame to the
/// socket. Stops on the first write failure; the connection is dead by
/// then and nothing upstream needs telling.
async fn run_writer(mut sink: SplitSink<WebSocket, Message>, mut rx: mpsc::UnboundedReceiver<ServerFrame>) {
    while let Some(frame) = rx.recv().await {
        let Ok(text) = serde_json::to_string(&frame) else {
            continue;
        };
        if let Err(err) = sink.send(Message::Text(text)).await {
            tracing::debug!(error = %err, "failed to write frame to client, connection likely closed");
            break;
        }
    }
}

fn emit(frame_tx: &FrameSender, frame: ServerFrame) {
    let _ = frame_tx.send(frame);
}

async fn handle_frame(frame: ClientFrame, state: &Arc<AppState>, frame_tx: &FrameSender, client_sessions: &Arc<SyncMutex<Vec<String>>>) {
    match frame {
        ClientFrame::StartSession { instance_id, session_id, profile, region } => {
            start_session(state, frame_tx, client_sessions, instance_id, session_id, profile, region).await;
        }
        ClientFrame::TerminalInput { session_id, input } => {
            if let Err(err) = state.sessions.write_input(&session_id, input.as_bytes()).await {
                emit(frame_tx, ServerFrame::SessionError {
                    session_id: Some(session_id),
                    error: err.to_string(),
                });
            }
        }
        ClientFrame::TerminalResize { session_id, rows, cols } => {
            if let Err(err) = state.sessions.resize_terminal(&session_id, rows, cols).await {
                tracing::debug!(session_id = %session_id, error = %err, "resize on unknown or closed session");
            }
        }
        ClientFrame::TerminalInterrupt { session_id } => {
            if let Err(err) = state.sessions.send_interrupt(&session_id) {
                tracing::debug!(session_id = %session_id, error = %err, "interrupt on unknown or closed session");
            }
        }
        ClientFrame::CloseSession { session_id } => {
            client_sessions.lock().retain(|id| id != &session_id);
            if let Err(err) = state.sessions.close_session(&session_id).await {
                tracing::debug!(session_id = %session_id, error = %err, "explicit close of unknown session");
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn start_session(
    state: &Arc<AppState>,
    frame_tx: &FrameSender,
    client_sessions: &Arc<SyncMutex<Vec<String>>>,
    instance_id: String,
    session_id: String,
    profile: Option<String>,
    region: Option<String>,
) {
    let (profile, region) = match (profile, region) {
        (Some(profile), Some(region)) => (profile, region),
        _ => match state.discovery.cache().get_config(&instance_id) {
            Ok(coordinate) => coordinate,
            Err(err) => {
                emit(frame_tx, ServerFrame::SessionError {
                    session_id: Some(session_id),
                    error: err.to_string(),
                });
                return;
            }
        },
    };

    let on_output: OutputSink = {
        let frame_tx = frame_tx.clone();
        let instance_id = instance_id.clone();
        let session_id = session_id.clone();
        Arc::new(move |chunk: Vec<u8>| {
            emit(&frame_tx, ServerFrame::TerminalOutput {
                instance_id: instance_id.clone(),
                session_id: session_id.clone(),
                output: String::from_utf8_lossy(&chunk).into_owned(),
            });
        })
    };

    let on_ended = {
        let frame_tx = frame_tx.clone();
        let client_sessions = Arc::clone(client_sessions);
        move |instance_id: String, session_id: String| {
            client_sessions.lock().retain(|id| id != &session_id);
            emit(&frame_tx, ServerFrame::SessionEnded { instance_id, session_id });
        }
    };

    match state
        .sessions
        .start_session(&instance_id, &session_id, &profile, &region, on_output, on_ended)
        .await
    {
        Ok(()) => {
            client_sessions.lock().push(session_id.clone());
            state.audit.append(
                &AuditEvent::now("session_start")
                    .with_instance(instance_id.clone(), instance_id.clone())
                    .with_profile_region(profile, region),
            ).unwrap_or_else(|err| tracing::warn!(error = %err, "failed to append audit event"));
            emit(frame_tx, ServerFrame::SessionStarted { instance_id, session_id });
        }
        Err(err) => {
            emit(frame_tx, ServerFrame::SessionError {
                session_id: Some(session_id),
                error: err.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
