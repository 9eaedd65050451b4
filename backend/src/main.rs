//! Main entry point for the user API backend.
//!
//! This file initializes logging and configuration, opens and migrates the
//! database, assembles the Axum router, and serves it until shutdown.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::Context;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let jwt_utils = JwtUtils::new(&config);
    let app = app(db.pool().clone(), jwt_utils, config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting user API server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

/// Builds the full router. Shared state travels as `Extension`s.
fn app(pool: SqlitePool, jwt_utils: JwtUtils, config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::user::routes::user_router())
        .merge(api::docs::docs_router())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(Extension(config))
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "User API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
