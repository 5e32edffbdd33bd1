// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Forwarder daemon (ctg-forwarderd)
//!
//! Runs as its own process alongside the gateway, tunneling a remote
//! desktop port on a target instance to a local port via an agent-channel
//! port-forwarding session fronted by a TCP relay.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;
use std::time::Duration;

use ctg_forwarder::{ForwarderConfig, ForwarderState};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("ctg-forwarderd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    let config = ForwarderConfig::load()?;
    let _guard = setup_logging(&config.log_dir)?;

    info!(
        port = config.port,
        range_start = config.port_range_start,
        range_end = config.port_range_end,
        "starting forwarder"
    );

    let state = Arc::new(ForwarderState::new(config.port_range_start, config.port_range_end));

    let app = ctg_forwarder::build_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    println!("READY");
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("shutdown signal received, tearing down active sessions");
    if tokio::time::timeout(SHUTDOWN_GRACE, state.shutdown()).await.is_err() {
        warn!("session shutdown did not complete within the shutdown grace period");
    }

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(err) => {
            warn!(error = %err, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
            unreachable!()
        }
    };
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::select! {
        _ = sigterm.recv() => {}
        _ = ctrl_c => {}
    }
}

fn setup_logging(log_dir: &str) -> Result<tracing_appender::non_blocking::WorkerGuard, std::io::Error> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "forwarder.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(guard)
}

fn print_help() {
    println!("ctg-forwarderd {}", env!("CARGO_PKG_VERSION"));
    println!("Forwarder - tunnels a remote desktop port on an instance to a local port");
    println!();
    println!("USAGE:");
    println!("    ctg-forwarderd");
    println!();
    println!("Configuration is read from the environment; see README for recognized variables.");
}
