// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn split_chunks_covers_every_byte_with_no_overlap() {
    let s = "a".repeat(250);
    let chunks = split_chunks(&s, 100);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 100);
    assert_eq!(chunks[1].len(), 100);
    assert_eq!(chunks[2].len(), 50);
    assert_eq!(chunks.concat(), s);
}

#[test]
fn split_chunks_on_empty_input_yields_no_chunks() {
    assert!(split_chunks("", 100).is_empty());
}

#[test]
fn posix_temp_path_lives_under_tmp() {
    assert!(temp_path(false).starts_with("/tmp/.ct_up_"));
}

#[test]
fn windows_temp_path_lives_under_windows_temp() {
    assert!(temp_path(true).starts_with("C:\\Windows\\Temp\\.ct_up_"));
}

#[test]
fn posix_append_command_uses_printf_and_shell_append() {
    let cmd = append_chunk_command("/tmp/.ct_up_1", "QUJD", false);
    assert_eq!(cmd, "printf '%s' 'QUJD' >> /tmp/.ct_up_1");
}

#[test]
fn windows_append_command_uses_append_all_text() {
    let cmd = append_chunk_command("C:\\Windows\\Temp\\.ct_up_1", "QUJD", true);
    assert!(cmd.starts_with("[IO.File]::AppendAllText("));
    assert!(cmd.contains("'QUJD'"));
}

#[test]
fn posix_finalize_decodes_and_removes_temp_file() {
    let cmd = finalize_command("/tmp/.ct_up_1", "/opt/app/out.bin", false);
    assert_eq!(
        cmd,
        "base64 -d /tmp/.ct_up_1 > '/opt/app/out.bin' && rm -f /tmp/.ct_up_1"
    );
}

#[test]
fn windows_finalize_creates_parent_directory_and_decodes() {
    let cmd = finalize_command("C:\\Windows\\Temp\\.ct_up_1", "C:\\data\\out.bin", true);
    assert!(cmd.contains("New-Item -ItemType Directory"));
    assert!(cmd.contains("[Convert]::FromBase64String"));
}
