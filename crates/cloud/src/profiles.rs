// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Enumerates configured profiles from the local credentials file.

use std::io::BufRead;
use std::path::PathBuf;

/// Parses `~/.aws/credentials`, returning the bracketed section names in
/// file order. Returns an empty vec if the home directory or file cannot be
/// located or opened -- this is not treated as an error, matching the
/// caller's "no profiles" handling.
pub fn parse_aws_profiles() -> Vec<String> {
    let Some(path) = credentials_path() else {
        return Vec::new();
    };
    let Ok(file) = std::fs::File::open(&path) else {
        return Vec::new();
    };
    parse_profiles_from(std::io::BufReader::new(file))
}

/// The section-name extraction, split out from file I/O so it can be
/// exercised directly in tests.
fn parse_profiles_from<R: BufRead>(reader: R) -> Vec<String> {
    let mut profiles = Vec::new();
    for line in reader.lines().map_while(Result::ok) {
        let line = line.trim();
        if let Some(inner) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = inner.trim();
            if !name.is_empty() {
                profiles.push(name.to_string());
            }
        }
    }
    profiles
}

fn credentials_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".aws").join("credentials"))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
