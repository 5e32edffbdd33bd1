// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[test]
fn posix_quote_wraps_plain_text() {
    assert_eq!(posix_quote("hello"), "'hello'");
}

#[test]
fn posix_quote_escapes_embedded_quote() {
    assert_eq!(posix_quote("it's"), "'it'\\''s'");
}

#[test]
fn posix_quote_handles_multiple_embedded_quotes() {
    assert_eq!(posix_quote("a'b'c"), "'a'\\''b'\\''c'");
}

#[test]
fn powershell_quote_wraps_plain_text() {
    assert_eq!(powershell_quote("hello"), "'hello'");
}

#[test]
fn powershell_quote_doubles_embedded_quote() {
    assert_eq!(powershell_quote("it's"), "'it''s'");
}

#[test]
fn powershell_quote_handles_multiple_embedded_quotes() {
    assert_eq!(powershell_quote("a'b'c"), "'a''b''c'");
}
