// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

fn entry(name: &str, is_dir: bool) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        size: 0,
        is_dir,
        modified: String::new(),
        permissions: String::new(),
    }
}

#[test]
fn directories_sort_before_files() {
    let mut entries = vec![entry("b.txt", false), entry("a-dir", true)];
    sort_entries(&mut entries);
    assert_eq!(entries[0].name, "a-dir");
    assert_eq!(entries[1].name, "b.txt");
}

#[test]
fn names_sort_case_insensitively_within_a_group() {
    let mut entries = vec![entry("Banana", false), entry("apple", false)];
    sort_entries(&mut entries);
    assert_eq!(entries[0].name, "apple");
    assert_eq!(entries[1].name, "Banana");
}
