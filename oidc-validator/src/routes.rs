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

//! Demo router: an open health check and a bearer-protected identity echo.

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};

use crate::middleware::{authenticate, Authentication};
use crate::state::AppState;

/// Build the router. Only routes registered before `route_layer` pass through
/// the authentication middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route_layer(from_fn_with_state(state, authenticate))
        .route("/health", get(health))
}

async fn whoami(auth: Authentication) -> Json<Authentication> {
    Json(auth)
}

async fn health() -> &'static str {
    "ok"
}
