// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Upload a file to an instance by appending base64 chunks through the
//! shell channel and decoding them back to bytes on the remote side.

use crate::error::TransferError;
use crate::timing::scaled_deadline;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ctg_cloud::{document_name_for_platform, posix_quote, powershell_quote, ssm_exec_output};
use ctg_core::ProgressEvent;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const UPLOAD_CHUNK_CHARS: usize = 150_000;

pub async fn upload_file(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    remote_path: &str,
    data: &[u8],
    platform: &str,
    mut on_progress: impl FnMut(ProgressEvent),
) -> Result<(), TransferError> {
    let deadline = scaled_deadline(data.len() as u64);
    let is_windows = platform.eq_ignore_ascii_case("windows");
    let document = document_name_for_platform(platform);
    let temp_file = temp_path(is_windows);

    let encoded = STANDARD.encode(data);
    let chunks = split_chunks(&encoded, UPLOAD_CHUNK_CHARS);
    let total_steps = chunks.len() + 1;

    for (i, chunk) in chunks.iter().enumerate() {
        let pct = ((i * 95) / total_steps) as u8;
        on_progress(ProgressEvent::progress(
            pct,
            format!("Transferring chunk {}/{}", i + 1, chunks.len()),
        ));

        let cmd = append_chunk_command(&temp_file, chunk, is_windows);
        if let Err(err) = ssm_exec_output(client, instance_id, &cmd, document, deadline).await {
            cleanup_temp(client, instance_id, &temp_file, is_windows, document, deadline).await;
            return Err(err.into());
        }
    }

    on_progress(ProgressEvent::progress(95, "Writing file..."));

    let final_cmd = finalize_command(&temp_file, remote_path, is_windows);
    if let Err(err) = ssm_exec_output(client, instance_id, &final_cmd, document, deadline).await {
        cleanup_temp(client, instance_id, &temp_file, is_windows, document, deadline).await;
        return Err(err.into());
    }

    on_progress(ProgressEvent::complete("Upload complete"));
    Ok(())
}

fn temp_path(is_windows: bool) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    if is_windows {
        format!("C:\\Windows\\Temp\\.ct_up_{nanos}")
    } else {
        format!("/tmp/.ct_up_{nanos}")
    }
}

fn append_chunk_command(temp_file: &str, chunk: &str, is_windows: bool) -> String {
    if is_windows {
        format!(
            "[IO.File]::AppendAllText({},'{}')",
            powershell_quote(temp_file),
            chunk
        )
    } else {
        format!("printf '%s' '{chunk}' >> {temp_file}")
    }
}

fn finalize_command(temp_file: &str, remote_path: &str, is_windows: bool) -> String {
    if is_windows {
        let remote_q = powershell_quote(remote_path);
        let temp_q = powershell_quote(temp_file);
        format!(
            "$d=Split-Path {remote_q}; if($d -and !(Test-Path $d)){{New-Item -ItemType Directory -Path $d -Force|Out-Null}}; \
             $b=[Convert]::FromBase64String([IO.File]::ReadAllText({temp_q})); \
             [IO.File]::WriteAllBytes({remote_q},$b); Remove-Item {temp_q} -Force"
        )
    } else {
        format!(
            "base64 -d {temp_file} > {} && rm -f {temp_file}",
            posix_quote(remote_path)
        )
    }
}

async fn cleanup_temp(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    temp_file: &str,
    is_windows: bool,
    document: &str,
    deadline: Duration,
) {
    let cmd = if is_windows {
        format!(
            "Remove-Item {} -Force -ErrorAction SilentlyContinue",
            powershell_quote(temp_file)
        )
    } else {
        format!("rm -f {temp_file}")
    };
    if let Err(err) = ssm_exec_output(client, instance_id, &cmd, document, deadline).await {
        tracing::debug!(error = %err, "best-effort temp-file cleanup after a failed upload also failed");
    }
}

/// Splits `s` into chunks of at most `size` characters each. `s` is always
/// base64 text here, so byte indexing stays on character boundaries.
fn split_chunks(s: &str, size: usize) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + size).min(bytes.len());
        chunks.push(&s[start..end]);
        start = end;
    }
    chunks
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
