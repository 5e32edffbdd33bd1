// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! List a remote directory via one shell command that emits
//! `|`-delimited records, one per entry.

use crate::error::TransferError;
use ctg_cloud::{document_name_for_platform, posix_quote, powershell_quote, ssm_exec_output};
use ctg_core::{sort_entries, FileEntry};
use std::time::Duration;

const BROWSE_DEADLINE: Duration = Duration::from_secs(90);

pub async fn browse_directory(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    path: &str,
    platform: &str,
) -> Result<Vec<FileEntry>, TransferError> {
    let is_windows = platform.eq_ignore_ascii_case("windows");
    let document = document_name_for_platform(platform);
    let cmd = listing_command(path, is_windows);

    let out = ssm_exec_output(client, instance_id, &cmd, document, BROWSE_DEADLINE).await?;
    let mut entries = parse_entries(out.trim(), is_windows);
    sort_entries(&mut entries);
    Ok(entries)
}

fn listing_command(path: &str, is_windows: bool) -> String {
    if is_windows {
        let q = powershell_quote(path);
        format!(
            "Get-ChildItem -Path {q} -Force -ErrorAction Stop | ForEach-Object {{ \
             $t=if($_.PSIsContainer){{\"D\"}}else{{\"F\"}}; \
             $s=if($_.PSIsContainer){{0}}else{{$_.Length}}; \
             $m=$_.LastWriteTime.ToString(\"yyyy-MM-dd HH:mm\"); \
             \"$t|$s|$m|$($_.Name)\" }}"
        )
    } else {
        let q = posix_quote(path);
        format!(
            "ls -la --time-style=long-iso {q} 2>/dev/null | tail -n +2 | while IFS= read -r line; do \
             t=\"F\"; if [ \"$(echo \"$line\" | cut -c1)\" = \"d\" ]; then t=\"D\"; fi; \
             perm=$(echo \"$line\" | awk '{{print $1}}'); size=$(echo \"$line\" | awk '{{print $5}}'); \
             mod=$(echo \"$line\" | awk '{{print $6\" \"$7}}'); name=$(echo \"$line\" | awk '{{print $NF}}'); \
             if [ -n \"$name\" ] && [ \"$name\" != \".\" ] && [ \"$name\" != \"..\" ]; then \
             echo \"$t|$size|$mod|$perm|$name\"; fi; done"
        )
    }
}

fn parse_entries(raw: &str, is_windows: bool) -> Vec<FileEntry> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_entry(line, is_windows))
        .collect()
}

fn parse_entry(line: &str, is_windows: bool) -> Option<FileEntry> {
    if is_windows {
        let parts: Vec<&str> = line.splitn(4, '|').collect();
        if parts.len() < 4 {
            return None;
        }
        Some(FileEntry {
            name: parts[3].to_string(),
            size: parts[1].parse().unwrap_or(0),
            is_dir: parts[0] == "D",
            modified: parts[2].to_string(),
            permissions: String::new(),
        })
    } else {
        let parts: Vec<&str> = line.splitn(5, '|').collect();
        if parts.len() < 5 {
            return None;
        }
        Some(FileEntry {
            name: parts[4].to_string(),
            size: parts[1].parse().unwrap_or(0),
            is_dir: parts[0] == "D",
            modified: parts[2].to_string(),
            permissions: parts[3].to_string(),
        })
    }
}

#[cfg(test)]
#[path = "browse_tests.rs"]
mod tests;
