// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Download a file from an instance by reading it back through the shell
//! channel in fixed-size base64 chunks.

use crate::error::TransferError;
use crate::timing::scaled_deadline;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ctg_cloud::{document_name_for_platform, posix_quote, powershell_quote, ssm_exec_output};
use ctg_core::ProgressEvent;
use std::time::Duration;

const DOWNLOAD_CHUNK_BYTES: u64 = 17_000;
const SIZE_QUERY_DEADLINE: Duration = Duration::from_secs(5 * 60);

pub struct DownloadedFile {
    pub data: Vec<u8>,
    pub filename: String,
}

pub async fn download_file(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    remote_path: &str,
    platform: &str,
    mut on_progress: impl FnMut(ProgressEvent),
) -> Result<DownloadedFile, TransferError> {
    let is_windows = platform.eq_ignore_ascii_case("windows");
    let document = document_name_for_platform(platform);
    let filename = basename(remote_path);

    on_progress(ProgressEvent::progress(0, "Checking file..."));

    let size_cmd = size_query_command(remote_path, is_windows);
    let size_out = ssm_exec_output(client, instance_id, &size_cmd, document, SIZE_QUERY_DEADLINE)
        .await?;
    let size_str = size_out.trim();
    if size_str.is_empty() || size_str == "FILE_NOT_FOUND" {
        return Err(TransferError::NotFound(remote_path.to_string()));
    }
    let file_size: u64 = size_str.parse().unwrap_or(0);

    if file_size == 0 {
        on_progress(ProgressEvent::complete("Download complete"));
        return Ok(DownloadedFile {
            data: Vec::new(),
            filename,
        });
    }

    let deadline = scaled_deadline(file_size);
    let total_chunks = file_size.div_ceil(DOWNLOAD_CHUNK_BYTES);
    let mut all_base64 = String::new();

    for i in 0..total_chunks {
        let pct = ((i * 95) / total_chunks) as u8;
        on_progress(ProgressEvent::progress(
            pct,
            format!("Reading chunk {}/{}", i + 1, total_chunks),
        ));

        let cmd = read_chunk_command(remote_path, i, is_windows);
        let out = ssm_exec_output(client, instance_id, &cmd, document, deadline).await?;
        all_base64.push_str(out.trim());
    }

    on_progress(ProgressEvent::progress(95, "Decoding..."));

    let mut decoded = STANDARD
        .decode(&all_base64)
        .map_err(|err| TransferError::Decode(err.to_string()))?;
    if decoded.len() as u64 > file_size {
        decoded.truncate(file_size as usize);
    }

    on_progress(ProgressEvent::complete("Download complete"));
    Ok(DownloadedFile {
        data: decoded,
        filename,
    })
}

fn size_query_command(remote_path: &str, is_windows: bool) -> String {
    if is_windows {
        let q = powershell_quote(remote_path);
        format!("if(Test-Path {q}){{(Get-Item {q}).Length}}else{{'FILE_NOT_FOUND'}}")
    } else {
        let q = posix_quote(remote_path);
        format!("stat -c%s {q} 2>/dev/null || echo FILE_NOT_FOUND")
    }
}

fn read_chunk_command(remote_path: &str, index: u64, is_windows: bool) -> String {
    if is_windows {
        let q = powershell_quote(remote_path);
        let offset = index * DOWNLOAD_CHUNK_BYTES;
        format!(
            "$f=[IO.File]::OpenRead({q});$b=New-Object byte[] {DOWNLOAD_CHUNK_BYTES};\
             [void]$f.Seek({offset},'Begin');$n=$f.Read($b,0,{DOWNLOAD_CHUNK_BYTES});$f.Close();\
             if($n -lt {DOWNLOAD_CHUNK_BYTES}){{$b=$b[0..($n-1)]}};[Convert]::ToBase64String($b)"
        )
    } else {
        let q = posix_quote(remote_path);
        format!("dd if={q} bs={DOWNLOAD_CHUNK_BYTES} skip={index} count=1 2>/dev/null | base64 -w0")
    }
}

/// Basename accepting both `/` and `\` separators.
fn basename(path: &str) -> String {
    match path.rfind(['/', '\\']) {
        Some(idx) => path[idx + 1..].to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
#[path = "download_tests.rs"]
mod tests;
