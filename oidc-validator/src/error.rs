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

//! Error types for validator construction, the key pipeline, and the HTTP layer.
//!
//! [`ConfigError`] is the only error that escapes to callers of the validator;
//! [`ValidatorError`] is raised by pipeline stages and folded into a
//! [`ValidatorResult`](crate::result::ValidatorResult) by the orchestrator.
//! [`AppError`] is what the Axum adapter sends back on rejection.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid validator configuration, raised synchronously by the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Options are missing.")]
    OptionsMissing,

    #[error("Issuer option is missing.")]
    IssuerMissing,

    #[error("Missing URI prefix within the 'issuer'.")]
    IssuerPrefixInvalid,
}

/// Failure of one stage of the discovery -> key set -> certificate pipeline.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The discovery document could not be retrieved.
    #[error("Something went wrong while fetching the OpenID discovery document: {0}")]
    DiscoveryFetch(#[source] reqwest::Error),

    /// The discovery document body is not valid JSON.
    #[error("Something went wrong while parsing the OpenID discovery document: {0}")]
    DiscoveryParse(#[source] serde_json::Error),

    /// The key set could not be retrieved (transport failure or unusable `jwks_uri`).
    #[error("Something went wrong while fetching the JWK set: {0}")]
    JwksFetch(#[source] reqwest::Error),

    /// The key set endpoint answered with a status other than 200.
    #[error("Something went wrong in order to get the JWK x509 Certificate.")]
    JwksUnexpectedResponse,

    /// The key set body is not valid JSON.
    #[error("Something went wrong while parsing the JSON from the JWK: {0}")]
    JwksParse(#[source] serde_json::Error),

    /// The key set has no `keys` entries.
    #[error("Something went wrong. We are not able to find any x509 certificate from the response.")]
    JwkKeyNotFound,

    /// The certificate is malformed or does not carry an RSA key.
    #[error("Something went wrong while parsing the x509 certificate: {0}")]
    CertificateParse(String),
}

/// Field-less discriminant of [`ValidatorError`], for matching without strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DiscoveryFetch,
    DiscoveryParse,
    JwksFetch,
    JwksUnexpectedResponse,
    JwksParse,
    JwkKeyNotFound,
    CertificateParse,
}

impl ValidatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DiscoveryFetch(_) => ErrorKind::DiscoveryFetch,
            Self::DiscoveryParse(_) => ErrorKind::DiscoveryParse,
            Self::JwksFetch(_) => ErrorKind::JwksFetch,
            Self::JwksUnexpectedResponse => ErrorKind::JwksUnexpectedResponse,
            Self::JwksParse(_) => ErrorKind::JwksParse,
            Self::JwkKeyNotFound => ErrorKind::JwkKeyNotFound,
            Self::CertificateParse(_) => ErrorKind::CertificateParse,
        }
    }
}

/// JSON body returned with every [`AppError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Envelope matching the `{ success, result }` shape used by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub result: ErrorBody,
}

/// HTTP-level error that pairs a status code with an [`ErrorBody`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl AppError {
    pub fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "A valid bearer token is required.",
        )
    }

    pub fn invalid_authorization() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "INVALID_AUTHORIZATION",
            "The Authorization header is not a bearer token.",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            result: self.body,
        };
        (self.status, Json(body)).into_response()
    }
}
