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

//! Validator options and service configuration loaded from environment variables.

use std::env;

use serde::Deserialize;

/// Options accepted by [`OidcValidator`](crate::validator::OidcValidator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidatorOptions {
    /// Identity provider base URL, e.g. `https://openid.example.com`.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Number of `verify` calls after which the cached key is refreshed.
    /// `None` keeps the first key forever; `Some(0)` refreshes on every call.
    #[serde(default, alias = "hitBeforeRefresh")]
    pub hit_before_refresh: Option<u64>,
}

impl ValidatorOptions {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: Some(issuer.into()),
            hit_before_refresh: None,
        }
    }

    pub fn with_hit_before_refresh(mut self, hits: u64) -> Self {
        self.hit_before_refresh = Some(hits);
        self
    }
}

/// Configuration for the `oidc-validator` service binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    /// Validator options. `None` when no `OIDC_*` variable is set at all.
    pub validator: Option<ValidatorOptions>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `OIDC_ISSUER`
    /// - `OIDC_HIT_BEFORE_REFRESH` (non-negative integer)
    pub fn from_env() -> Result<Self, String> {
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let issuer = env::var("OIDC_ISSUER").ok().filter(|s| !s.is_empty());
        let hit_before_refresh = env::var("OIDC_HIT_BEFORE_REFRESH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| "OIDC_HIT_BEFORE_REFRESH must be a non-negative integer")
            })
            .transpose()?;

        let validator = if issuer.is_none() && hit_before_refresh.is_none() {
            None
        } else {
            Some(ValidatorOptions {
                issuer,
                hit_before_refresh,
            })
        };

        Ok(Self {
            listen_addr,
            validator,
        })
    }
}
