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

//! JWKS (JSON Web Key Set) fetch and first-certificate extraction.
//!
//! Only `keys[0].x5c[0]` is ever considered; additional keys and chain
//! certificates are ignored.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::ValidatorError;

/// Fetch the key set and return the first certificate of its first key.
///
/// `Ok(None)` means the first key carries no `x5c` chain; the caller decides
/// what to verify against in that case.
pub async fn fetch_first_certificate(
    client: &reqwest::Client,
    jwks_uri: &str,
) -> Result<Option<String>, ValidatorError> {
    debug!(uri = %jwks_uri, "Fetching JWKS");

    let resp = client
        .get(jwks_uri)
        .send()
        .await
        .map_err(ValidatorError::JwksFetch)?;

    if resp.status() != StatusCode::OK {
        debug!(status = %resp.status(), "JWKS endpoint answered with unexpected status");
        return Err(ValidatorError::JwksUnexpectedResponse);
    }

    let body = resp.text().await.map_err(ValidatorError::JwksFetch)?;
    first_certificate(&body)
}

/// Extract `keys[0].x5c[0]` from a raw key set body.
///
/// Only unparseable JSON is a parse error. Any well-formed document without a
/// non-empty `keys` array, `null` and scalars included, has no key to offer.
fn first_certificate(body: &str) -> Result<Option<String>, ValidatorError> {
    let document: Value = serde_json::from_str(body).map_err(ValidatorError::JwksParse)?;

    let first_key = document
        .get("keys")
        .and_then(Value::as_array)
        .and_then(|keys| keys.first())
        .ok_or(ValidatorError::JwkKeyNotFound)?;

    Ok(first_key
        .get("x5c")
        .and_then(Value::as_array)
        .and_then(|chain| chain.first())
        .and_then(Value::as_str)
        .map(str::to_string))
}
