// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;
use std::io::Cursor;

fn parse(s: &str) -> Vec<String> {
    parse_profiles_from(Cursor::new(s.as_bytes()))
}

#[test]
fn extracts_bracketed_section_names() {
    let ini = "[default]\naws_access_key_id = x\n[prod]\naws_access_key_id = y\n";
    assert_eq!(parse(ini), vec!["default", "prod"]);
}

#[test]
fn trims_whitespace_around_brackets_and_name() {
    let ini = "  [ dev ]  \nkey=val\n";
    assert_eq!(parse(ini), vec!["dev"]);
}

#[test]
fn ignores_lines_that_are_not_section_headers() {
    let ini = "# comment\naws_access_key_id = abc\n[only-one]\n";
    assert_eq!(parse(ini), vec!["only-one"]);
}

#[test]
fn empty_file_yields_no_profiles() {
    assert!(parse("").is_empty());
}

#[test]
fn skips_empty_bracket_pairs() {
    let ini = "[]\n[real]\n";
    assert_eq!(parse(ini), vec!["real"]);
}
