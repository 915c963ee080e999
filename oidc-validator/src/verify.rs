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

//! RS256 signature verification and unverified payload decode.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::result::ValidatorResult;

/// Verify `token` against `public_key_pem` using RS256 only.
///
/// Every failure (unparsable key, malformed token, bad signature, expired
/// `exp`, future `nbf`) is reported as `Unauthorized`. An empty key is not
/// special-cased; it simply fails to load and denies.
pub fn verify_signature(token: &str, public_key_pem: &str) -> ValidatorResult {
    let key = match DecodingKey::from_rsa_pem(public_key_pem.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            debug!("Public key could not be loaded: {e}");
            return ValidatorResult::unauthorized();
        }
    };

    match decode::<serde_json::Value>(token, &key, &rs256_validation()) {
        Ok(_) => ValidatorResult::authorized(),
        Err(e) => {
            debug!("JWT rejected: {e}");
            ValidatorResult::unauthorized()
        }
    }
}

/// Signature plus time-window checks; no audience/issuer matching and no
/// mandatory claims.
fn rs256_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation
}

/// Decode the payload of a JWT **without** signature verification.
///
/// Returns `None` if the token is not three dot-separated segments or the
/// payload is not base64url JSON.
pub fn decode_payload_unverified(token: &str) -> Option<serde_json::Value> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
