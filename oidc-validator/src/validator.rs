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

//! The validator: owns the key cache and sequences discovery, key set fetch,
//! certificate processing and signature verification.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::KeyCache;
use crate::certificate::to_public_key_pem;
use crate::config::ValidatorOptions;
use crate::discovery::{discovery_uri, fetch_jwks_uri};
use crate::error::{ConfigError, ValidatorError};
use crate::jwks::fetch_first_certificate;
use crate::result::ValidatorResult;
use crate::verify::verify_signature;

const ISSUER_PREFIXES: [&str; 3] = ["http://", "https://", "://"];

/// Validates bearer tokens issued by one OIDC provider.
///
/// The provider's signing key is fetched lazily on the first [`verify`](Self::verify)
/// and then reused until `hit_before_refresh` calls have been served.
///
/// Concurrent calls on one instance are serialized around the refresh: while
/// one caller is fetching a key, the others wait and then reuse it instead of
/// starting their own fetch.
#[derive(Debug)]
pub struct OidcValidator {
    discovery_uri: String,
    hit_before_refresh: Option<u64>,
    http: reqwest::Client,
    cache: Mutex<KeyCache>,
}

impl OidcValidator {
    pub fn new(options: ValidatorOptions) -> Result<Self, ConfigError> {
        Self::from_options(Some(options))
    }

    /// Like [`new`](Self::new), but accepts an absent options object.
    pub fn from_options(options: Option<ValidatorOptions>) -> Result<Self, ConfigError> {
        Self::build(options, reqwest::Client::new())
    }

    /// Build a validator that issues its requests through `http`.
    pub fn with_client(
        options: ValidatorOptions,
        http: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        Self::build(Some(options), http)
    }

    fn build(
        options: Option<ValidatorOptions>,
        http: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let options = options.ok_or(ConfigError::OptionsMissing)?;
        let issuer = options
            .issuer
            .as_deref()
            .filter(|issuer| !issuer.is_empty())
            .ok_or(ConfigError::IssuerMissing)?;

        if !ISSUER_PREFIXES.iter().any(|p| issuer.starts_with(p)) {
            return Err(ConfigError::IssuerPrefixInvalid);
        }

        Ok(Self {
            discovery_uri: discovery_uri(issuer),
            hit_before_refresh: options.hit_before_refresh,
            http,
            cache: Mutex::new(KeyCache::new()),
        })
    }

    pub fn discovery_uri(&self) -> &str {
        &self.discovery_uri
    }

    /// Verify `token`. Never fails: pipeline errors come back as an
    /// `Error` result carrying the stage's message.
    pub async fn verify(&self, token: &str) -> ValidatorResult {
        let public_key_pem = {
            let mut cache = self.cache.lock().await;
            cache.record_hit();

            if cache.refresh_due(self.hit_before_refresh) {
                debug!(
                    hit_count = cache.hit_count(),
                    hit_before_refresh = ?self.hit_before_refresh,
                    "Refreshing provider key"
                );
                cache.reset_hits();

                match self.fetch_public_key().await {
                    Ok(Some(pem)) => {
                        info!(uri = %self.discovery_uri, "Provider key refreshed");
                        cache.replace(pem);
                    }
                    Ok(None) => {
                        warn!(
                            uri = %self.discovery_uri,
                            "Key set has no x5c certificate, verifying against the key already held"
                        );
                    }
                    Err(err) => {
                        warn!(uri = %self.discovery_uri, kind = ?err.kind(), "Key refresh failed: {err}");
                        return ValidatorResult::from_error(&err);
                    }
                }
            }

            cache.public_key_pem().unwrap_or_default().to_string()
        };

        verify_signature(token, &public_key_pem)
    }

    /// Discovery -> key set -> certificate. `Ok(None)` when the first key has no `x5c`.
    async fn fetch_public_key(&self) -> Result<Option<String>, ValidatorError> {
        let jwks_uri = fetch_jwks_uri(&self.http, &self.discovery_uri).await?;
        let Some(certificate) = fetch_first_certificate(&self.http, &jwks_uri).await? else {
            return Ok(None);
        };
        to_public_key_pem(&certificate).map(Some)
    }

    #[cfg(test)]
    pub(crate) async fn cached_key(&self) -> Option<String> {
        self.cache.lock().await.public_key_pem().map(str::to_string)
    }
}
