// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Shell-channel transfer routes: directory browsing, upload, download, and
//! fleet-wide command broadcast. Upload and download stream progress as
//! newline-delimited JSON, ending in a `complete` or `error` line.

use crate::error::GatewayError;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ctg_core::{AuditEvent, BroadcastTarget, FileEntry, Instance, ProgressEvent};
use ctg_discovery::DiscoveryError;
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

fn resolve_instance(state: &AppState, instance_id: &str) -> Result<Instance, GatewayError> {
    state
        .discovery
        .cache()
        .get_instance(instance_id)
        .ok_or_else(|| DiscoveryError::InstanceNotFound(instance_id.to_string()).into())
}

#[derive(Debug, Deserialize)]
pub struct BrowseDirectoryRequest {
    instance_id: String,
    path: String,
}

pub async fn browse_directory(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BrowseDirectoryRequest>,
) -> Result<Json<Vec<FileEntry>>, GatewayError> {
    let instance = resolve_instance(&state, &req.instance_id)?;
    let client = crate::state::ssm_client(&instance.aws_profile, &instance.aws_region).await;
    let entries = ctg_transfer::browse_directory(&client, &instance.instance_id, &req.path, &instance.platform).await?;
    Ok(Json(entries))
}

fn to_ndjson_line(event: &impl Serialize) -> Vec<u8> {
    let mut line = serde_json::to_vec(event).unwrap_or_default();
    line.push(b'\n');
    line
}

/// Streams pre-serialized NDJSON lines as they arrive on `rx`.
fn ndjson_response(mut rx: mpsc::Receiver<Vec<u8>>) -> Response {
    let stream = stream::poll_fn(move |cx| rx.poll_recv(cx)).map(Ok::<_, std::io::Error>);
    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(stream),
    )
        .into_response()
}

pub async fn upload_file(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Result<Response, GatewayError> {
    let mut instance_id = None;
    let mut remote_path = None;
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| GatewayError::BadRequest(err.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "instance_id" => {
                instance_id = Some(field.text().await.map_err(|err| GatewayError::BadRequest(err.to_string()))?);
            }
            "path" => {
                remote_path = Some(field.text().await.map_err(|err| GatewayError::BadRequest(err.to_string()))?);
            }
            "file" => {
                data = Some(field.bytes().await.map_err(|err| GatewayError::BadRequest(err.to_string()))?);
            }
            _ => {}
        }
    }

    let instance_id = instance_id.ok_or_else(|| GatewayError::BadRequest("missing instance_id".to_string()))?;
    let remote_path = remote_path.ok_or_else(|| GatewayError::BadRequest("missing path".to_string()))?;
    let data = data.ok_or_else(|| GatewayError::BadRequest("missing file".to_string()))?.to_vec();

    let instance = resolve_instance(&state, &instance_id)?;
    let audit = Arc::clone(&state.audit);
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let client = crate::state::ssm_client(&instance.aws_profile, &instance.aws_region).await;
        let result = ctg_transfer::upload_file(
            &client,
            &instance.instance_id,
            &remote_path,
            &data,
            &instance.platform,
            |event| {
                let _ = tx.try_send(to_ndjson_line(&event));
            },
        )
        .await;

        match result {
            Ok(()) => {
                audit.append(
                    &AuditEvent::now("upload_file")
                        .with_instance(instance.instance_id.clone(), instance.name.clone())
                        .with_details(remote_path),
                ).unwrap_or_else(|err| tracing::warn!(error = %err, "failed to append audit event"));
            }
            Err(err) => {
                let _ = tx.send(to_ndjson_line(&ProgressEvent::error(err.to_string()))).await;
            }
        }
    });

    Ok(ndjson_response(rx))
}

#[derive(Debug, Deserialize)]
pub struct DownloadFileRequest {
    instance_id: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct DownloadComplete {
    progress: u8,
    message: &'static str,
    status: &'static str,
    data: String,
    filename: String,
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DownloadFileRequest>,
) -> Result<Response, GatewayError> {
    let instance = resolve_instance(&state, &req.instance_id)?;
    let audit = Arc::clone(&state.audit);
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let client = crate::state::ssm_client(&instance.aws_profile, &instance.aws_region).await;
        let tx_progress = tx.clone();
        let result = ctg_transfer::download_file(
            &client,
            &instance.instance_id,
            &req.path,
            &instance.platform,
            |event| {
                // The terminal `complete` line is replaced below with one
                // that also carries the file's data and name.
                if !matches!(event.status, ctg_core::ProgressStatus::Complete) {
                    let _ = tx_progress.try_send(to_ndjson_line(&event));
                }
            },
        )
        .await;

        match result {
            Ok(downloaded) => {
                use base64::engine::general_purpose::STANDARD;
                use base64::Engine as _;
                let final_line = DownloadComplete {
                    progress: 100,
                    message: "Download complete",
                    status: "complete",
                    data: STANDARD.encode(&downloaded.data),
                    filename: downloaded.filename,
                };
                let _ = tx.send(to_ndjson_line(&final_line)).await;
                audit.append(
                    &AuditEvent::now("download_file")
                        .with_instance(instance.instance_id.clone(), instance.name.clone())
                        .with_details(req.path),
                ).unwrap_or_else(|err| tracing::warn!(error = %err, "failed to append audit event"));
            }
            Err(err) => {
                let _ = tx.send(to_ndjson_line(&ProgressEvent::error(err.to_string()))).await;
            }
        }
    });

    Ok(ndjson_response(rx))
}

#[derive(Debug, Deserialize)]
pub struct BroadcastCommandRequest {
    instance_ids: Vec<String>,
    command: String,
}

pub async fn broadcast_command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BroadcastCommandRequest>,
) -> Result<Json<Vec<ctg_core::BroadcastResult>>, GatewayError> {
    if req.command.trim().is_empty() {
        return Err(GatewayError::BadRequest("command must not be empty".to_string()));
    }

    let targets: Vec<BroadcastTarget> = req
        .instance_ids
        .iter()
        .filter_map(|id| state.discovery.cache().get_instance(id))
        .map(|i| BroadcastTarget {
            instance_id: i.instance_id,
            name: i.name,
            profile: i.aws_profile,
            region: i.aws_region,
            platform: i.platform,
        })
        .collect();

    let results = ctg_transfer::broadcast_command(targets, &req.command).await;
    state.audit.append(
        &AuditEvent::now("broadcast_command").with_details(req.command),
    ).unwrap_or_else(|err| tracing::warn!(error = %err, "failed to append audit event"));
    Ok(Json(results))
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
