// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! One-shot instance metrics: a single shell command concatenates CPU,
//! memory, disk, and uptime figures into a `|`-separated record.

use crate::error::TransferError;
use ctg_cloud::{document_name_for_platform, ssm_exec_output};
use ctg_core::InstanceMetrics;
use std::collections::HashMap;
use std::time::Duration;

const METRICS_DEADLINE: Duration = Duration::from_secs(2 * 60);

const LINUX_COMMAND: &str = r#"LOAD=$(awk '{print $1}' /proc/loadavg);CPUS=$(nproc 2>/dev/null || echo 1);eval $(free -m | awk '/^Mem:/{printf "MEMUSED=%d MEMTOT=%d MEMPCT=%.1f",$3,$2,$3/$2*100}');eval $(df -BG / | awk 'NR==2{gsub("G","");printf "DISKUSED=%s DISKTOT=%s DISKPCT=%.1f",$3,$2,$5}');UPTIME=$(uptime -p 2>/dev/null || uptime | sed 's/.*up/up/');echo "CPU:${LOAD}|CPUS:${CPUS}|MEMPCT:${MEMPCT}|MEMTOT:${MEMTOT}|MEMUSED:${MEMUSED}|DISKPCT:${DISKPCT}|DISKTOT:${DISKTOT}|DISKUSED:${DISKUSED}|UPTIME:${UPTIME}""#;

const WINDOWS_COMMAND: &str = r#"$cpu=(Get-WmiObject Win32_Processor|Measure-Object -Property LoadPercentage -Average).Average;$os=Get-WmiObject Win32_OperatingSystem;$memTotal=[math]::Round($os.TotalVisibleMemorySize/1024);$memUsed=$memTotal-[math]::Round($os.FreePhysicalMemory/1024);$memPct=[math]::Round(($memUsed/$memTotal)*100,1);$disk=Get-WmiObject Win32_LogicalDisk -Filter "DeviceID='C:'";$diskTotal=[math]::Round($disk.Size/1GB,1);$diskUsed=[math]::Round(($disk.Size-$disk.FreeSpace)/1GB,1);$diskPct=[math]::Round((($disk.Size-$disk.FreeSpace)/$disk.Size)*100,1);$uptime=(Get-Date)-(Get-CimInstance Win32_OperatingSystem).LastBootUpTime;$uptimeStr="$($uptime.Days)d $($uptime.Hours)h $($uptime.Minutes)m";$cpuCount=(Get-WmiObject Win32_Processor).NumberOfLogicalProcessors;"CPU:$cpu|CPUS:$cpuCount|MEMPCT:$memPct|MEMTOT:$memTotal|MEMUSED:$memUsed|DISKPCT:$diskPct|DISKTOT:$diskTotal|DISKUSED:$diskUsed|UPTIME:$uptimeStr""#;

pub async fn instance_metrics(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    platform: &str,
) -> Result<InstanceMetrics, TransferError> {
    let is_windows = platform.eq_ignore_ascii_case("windows");
    let document = document_name_for_platform(platform);
    let command = if is_windows { WINDOWS_COMMAND } else { LINUX_COMMAND };

    let out = ssm_exec_output(client, instance_id, command, document, METRICS_DEADLINE).await?;
    Ok(parse_metrics(out.trim()))
}

fn parse_metrics(raw: &str) -> InstanceMetrics {
    let kv: HashMap<&str, &str> = raw
        .split('|')
        .filter_map(|part| part.split_once(':'))
        .collect();

    let num = |key: &str| kv.get(key).and_then(|v| v.parse().ok()).unwrap_or_default();

    InstanceMetrics {
        cpu_load: num("CPU"),
        cpu_count: num("CPUS"),
        mem_used_pct: num("MEMPCT"),
        mem_total_mb: num("MEMTOT"),
        mem_used_mb: num("MEMUSED"),
        disk_used_pct: num("DISKPCT"),
        disk_total_gb: num("DISKTOT"),
        disk_used_gb: num("DISKUSED"),
        uptime: kv.get("UPTIME").unwrap_or(&"").to_string(),
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
