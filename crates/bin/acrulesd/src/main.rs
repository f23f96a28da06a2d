//! # acrulesd: AC rules daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Seed the starter rules into an empty store
//! - Construct the rule service and the climate controller
//! - Spawn the periodic control loop
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use acrules_adapter_http_axum::router;
use acrules_adapter_http_axum::state::AppState;
use acrules_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteRuleRepository};
use acrules_adapter_virtual::{SystemClock, VirtualAc, VirtualSensor};
use acrules_app::control_loop;
use acrules_app::controller::ClimateController;
use acrules_app::services::rule_service::RuleService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let rules = Arc::new(SqliteRuleRepository::new(db.pool().clone()));

    // Services
    let rule_service =
        RuleService::new(Arc::clone(&rules)).with_max_rules(config.controller.max_rules);
    if config.controller.seed_defaults {
        rule_service.seed_defaults().await?;
    }

    let controller = Arc::new(
        ClimateController::new(
            rules,
            VirtualSensor::new(config.sensor.initial_temp),
            SystemClock,
            VirtualAc::default(),
        )
        .with_debug_mode(config.controller.debug_mode),
    );

    // Control loop
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let control_task = control_loop::spawn(
        Arc::clone(&controller),
        config.control_interval(),
        shutdown_rx,
    );

    // HTTP
    let app = router::build(AppState::new(rule_service, controller));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "acrulesd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tx.send_replace(true);
    control_task.await?;
    tracing::info!("acrulesd shut down gracefully");

    Ok(())
}

/// Resolves on CTRL-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received CTRL-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
