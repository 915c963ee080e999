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

//! OIDC discovery: resolving the issuer's `jwks_uri` from `.well-known/openid-configuration`.

use serde_json::Value;
use tracing::debug;

use crate::error::ValidatorError;

pub const OIDC_DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Build `{issuer}/.well-known/openid-configuration` without doubling the separator.
pub fn discovery_uri(issuer: &str) -> String {
    format!("{}{}", issuer.trim_end_matches('/'), OIDC_DISCOVERY_PATH)
}

/// Fetch the discovery document and return its `jwks_uri` as-is.
///
/// The response status is not inspected: whatever body comes back must be JSON
/// or the call fails with [`ValidatorError::DiscoveryParse`]. A missing or
/// non-string `jwks_uri` comes back empty, so the key set fetch fails instead.
pub async fn fetch_jwks_uri(
    client: &reqwest::Client,
    discovery_uri: &str,
) -> Result<String, ValidatorError> {
    debug!(uri = %discovery_uri, "Fetching OIDC discovery document");

    let resp = client
        .get(discovery_uri)
        .send()
        .await
        .map_err(ValidatorError::DiscoveryFetch)?;
    let body = resp.text().await.map_err(ValidatorError::DiscoveryFetch)?;

    let document: Value = serde_json::from_str(&body).map_err(ValidatorError::DiscoveryParse)?;
    let jwks_uri = document
        .get("jwks_uri")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    debug!(jwks_uri = %jwks_uri, "Resolved JWKS endpoint");
    Ok(jwks_uri)
}
