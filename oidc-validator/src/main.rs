/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! OIDC validator service entry point.
//!
//! Serves `/health` and a bearer-protected `/whoami` backed by one validator.

use anyhow::Context;
use oidc_validator::config::Config;
use oidc_validator::routes;
use oidc_validator::state::AppState;
use oidc_validator::OidcValidator;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let validator =
        OidcValidator::from_options(config.validator).context("invalid OIDC configuration")?;
    tracing::info!(
        discovery_uri = %validator.discovery_uri(),
        "OIDC validator configured"
    );

    let app = routes::router(AppState::new(validator)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("OIDC validator listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("server error")
}
