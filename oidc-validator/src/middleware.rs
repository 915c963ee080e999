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

//! Axum middleware that authenticates `Authorization: Bearer <token>` requests.
//!
//! - No `Authorization` header: the request goes through as anonymous.
//! - A header that is not a bearer token: 401, the request is not forwarded.
//! - A bearer token the validator does not authorize (including `Error`
//!   results): 401, the request is not forwarded.
//! - An authorized token: the request goes through with an
//!   [`Authentication`] extension holding the decoded token payload.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::result::VerifyStatusCode;
use crate::state::AppState;
use crate::verify::decode_payload_unverified;

/// Per-request authentication outcome, attached as a request extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Authentication {
    pub authenticated: bool,
    /// Token payload. Decoded, not re-verified: only meaningful because the
    /// middleware forwards authorized requests exclusively.
    pub user: Option<serde_json::Value>,
}

impl Authentication {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is case-insensitive and must be followed by exactly one space
/// and a non-empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.starts_with(char::is_whitespace) {
        return None;
    }
    let token = token.trim_end();
    (!token.is_empty()).then_some(token)
}

/// Middleware entry point; mount with `axum::middleware::from_fn_with_state`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(raw) = request.headers().get(header::AUTHORIZATION).cloned() else {
        request.extensions_mut().insert(Authentication::anonymous());
        return Ok(next.run(request).await);
    };

    let token = raw
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            debug!("Rejecting request with a non-bearer Authorization header");
            AppError::invalid_authorization()
        })?
        .to_string();

    let result = state.validator.verify(&token).await;
    match result.status_code {
        VerifyStatusCode::Authorized => {}
        VerifyStatusCode::Unauthorized => {
            debug!("Bearer token rejected");
            return Err(AppError::unauthorized());
        }
        VerifyStatusCode::Error => {
            warn!(
                error = result.error_message.as_deref().unwrap_or_default(),
                "Bearer token could not be verified"
            );
            return Err(AppError::unauthorized());
        }
    }

    request.extensions_mut().insert(Authentication {
        authenticated: true,
        user: decode_payload_unverified(&token),
    });
    Ok(next.run(request).await)
}

impl<S: Send + Sync> FromRequestParts<S> for Authentication {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Authentication>()
            .cloned()
            .unwrap_or_default())
    }
}
