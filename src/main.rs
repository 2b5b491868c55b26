//! proxy-hub — keeps an external reverse proxy's routing table in sync with
//! the hub's backend registry.
//!
//! # Architecture Overview
//!
//! ```text
//!   admin trigger ─┐                       ┌──────────────┐
//!   startup ───────┼─▶ ┌──────────────┐    │   registry   │ expected
//!   relocation ────┤   │ reconcile    │◀───│  (users +    │ table
//!   timer ─────────┘   │ engine       │    │   services)  │
//!                      └──────┬───────┘    └──────────────┘
//!                             │ diff + add/remove
//!                             ▼
//!                      ┌──────────────┐
//!                      │ proxy client │──▶ proxy /api/routes
//!                      └──────────────┘    (actual table)
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use proxy_hub::admin::{admin_router, AppState};
use proxy_hub::config::load_config;
use proxy_hub::lifecycle::Shutdown;
use proxy_hub::observability::metrics;
use proxy_hub::proxy::{LocationManager, ProxyClient, ProxyLocation};
use proxy_hub::reconcile::Reconciler;
use proxy_hub::registry::{BackendRecord, Registry};
use proxy_hub::routes::RouteSpec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proxy_hub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("proxy-hub v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "hub.toml".to_string());
    let config = load_config(Path::new(&config_path))?;

    tracing::info!(
        config = %config_path,
        admin_address = %config.admin.bind_address,
        proxy_api_url = %config.proxy.api_url,
        check_interval_secs = config.hub.check_interval_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Assemble the engine.
    let location = Arc::new(LocationManager::new(ProxyLocation::parse(
        &config.proxy.api_url,
        &config.proxy.auth_token,
    )?));
    let hub_url = config
        .hub
        .public_url
        .as_deref()
        .map(Url::parse)
        .transpose()?;
    let registry = Arc::new(Registry::new(hub_url));
    for service in &config.services {
        let path = service
            .path
            .clone()
            .unwrap_or_else(|| format!("/services/{}/", service.name));
        let spec = RouteSpec::new(service.host.as_str(), path)?;
        let target: Url = service.target.parse()?;
        registry.upsert_service(&service.name, BackendRecord::running(spec, target));
        tracing::info!(service = %service.name, target = %service.target, "Service registered");
    }

    let client = ProxyClient::new(
        location.clone(),
        Duration::from_secs(config.proxy.connect_timeout_secs),
        Duration::from_secs(config.proxy.request_timeout_secs),
    )?;
    let reconciler = Arc::new(Reconciler::new(registry, client, location));

    // Jumpstart: a proxy that is already up gets corrected immediately; one
    // that is still starting will be caught by the timer or an admin POST.
    match reconciler.check_routes().await {
        Ok(report) => tracing::info!(
            added = report.added,
            removed = report.removed,
            "Startup reconciliation complete"
        ),
        Err(e) => tracing::warn!(error = %e, "Startup reconciliation failed, proxy may not be up yet"),
    }

    let shutdown = Shutdown::new();

    // Caller-owned timer; the engine itself never schedules passes.
    if config.hub.check_interval_secs > 0 {
        let reconciler = reconciler.clone();
        let mut rx = shutdown.subscribe();
        let interval = Duration::from_secs(config.hub.check_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = reconciler.check_routes().await {
                            tracing::warn!(error = %e, "Periodic reconciliation failed");
                        }
                    }
                    _ = rx.recv() => break,
                }
            }
        });
    }

    let state = AppState {
        reconciler,
        api_token: Arc::from(config.admin.api_token.as_str()),
    };
    let listener = TcpListener::bind(&config.admin.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Admin API listening");

    axum::serve(listener, admin_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.trigger();
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
