//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns the path to a binary, checking the llvm-cov target directory
/// first so coverage runs find the same binary plain `cargo test` does.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn gatewayd_binary() -> PathBuf {
    binary_path("ctg-gatewayd")
}

pub fn forwarderd_binary() -> PathBuf {
    binary_path("ctg-forwarderd")
}

pub fn gatewayd_cmd() -> Command {
    Command::new(gatewayd_binary())
}

pub fn forwarderd_cmd() -> Command {
    Command::new(forwarderd_binary())
}
