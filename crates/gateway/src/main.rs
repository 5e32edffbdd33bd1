// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Cloud Terminal Gateway daemon (ctg-gatewayd)
//!
//! Serves the fleet discovery, terminal session, and shell-channel
//! transfer HTTP/WebSocket surface described in the gateway's external
//! interfaces, backed by a background scan loop that keeps the instance
//! cache warm.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;
use std::time::Duration;

use ctg_core::GatewayConfig;
use ctg_gateway::AppState;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("ctg-gatewayd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    let config = GatewayConfig::load()?;
    let _guard = setup_logging(&config.log_dir)?;

    info!(port = config.port, tag1 = %config.tag1, tag2 = %config.tag2, "starting cloud terminal gateway");

    let state = Arc::new(AppState::new(config.clone()));
    state.discovery.warm_from_snapshot();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scan_handle = tokio::spawn(ctg_discovery::run_background_scan_loop(
        Arc::clone(&state.discovery),
        config.cache_ttl_seconds,
        shutdown_rx,
    ));

    let app = ctg_gateway::build_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    println!("READY");
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("shutdown signal received, closing sessions and stopping background scan");
    let _ = shutdown_tx.send(true);
    state.sessions.close_all().await;

    if tokio::time::timeout(SHUTDOWN_GRACE, scan_handle).await.is_err() {
        warn!("background scan loop did not stop within the shutdown grace period");
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
    let file_appender = tracing_appender::rolling::daily(log_dir, "gateway.log");
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
    println!("ctg-gatewayd {}", env!("CARGO_PKG_VERSION"));
    println!("Cloud terminal gateway - fleet discovery, terminal sessions, and file transfer over HTTP/WebSocket");
    println!();
    println!("USAGE:");
    println!("    ctg-gatewayd");
    println!();
    println!("Configuration is read from the environment; see README for recognized variables.");
}
