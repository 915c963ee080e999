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

//! OpenID Connect bearer token validation.
//!
//! [`OidcValidator`] discovers the provider's key set from
//! `{issuer}/.well-known/openid-configuration`, turns the first `x5c`
//! certificate into an RSA public key, and checks RS256 signatures against it.
//! The key is cached and refreshed after a configurable number of calls.
//!
//! The [`middleware`] module wires a validator into an Axum router; the binary
//! entry point (`main.rs`) serves a small demo router built on it.
//!
//! ```no_run
//! use oidc_validator::{OidcValidator, ValidatorOptions, VerifyStatusCode};
//!
//! # async fn example(token: &str) -> Result<(), oidc_validator::ConfigError> {
//! let validator = OidcValidator::new(
//!     ValidatorOptions::new("https://openid.example.com").with_hit_before_refresh(1_000),
//! )?;
//!
//! match validator.verify(token).await.status_code {
//!     VerifyStatusCode::Authorized => println!("welcome"),
//!     VerifyStatusCode::Unauthorized => println!("bad token"),
//!     VerifyStatusCode::Error => println!("provider unavailable"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod certificate;
pub mod config;
pub mod discovery;
pub mod error;
pub mod jwks;
pub mod middleware;
pub mod result;
pub mod routes;
pub mod state;
pub mod validator;
pub mod verify;

pub use config::ValidatorOptions;
pub use error::{ConfigError, ErrorKind, ValidatorError};
pub use middleware::Authentication;
pub use result::{ValidatorResult, VerifyStatusCode};
pub use validator::OidcValidator;
