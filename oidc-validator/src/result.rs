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

//! Outcome of a single `verify` call.

use serde::{Deserialize, Serialize};

use crate::error::ValidatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerifyStatusCode {
    /// The signature checks out against the provider's key.
    Authorized,
    /// The token was checked and rejected.
    Unauthorized,
    /// The provider's key could not be obtained, so nothing was checked.
    Error,
}

/// Tri-state verification result. Never carries a message unless `status_code` is `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorResult {
    pub status_code: VerifyStatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidatorResult {
    pub fn authorized() -> Self {
        Self {
            status_code: VerifyStatusCode::Authorized,
            error_message: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status_code: VerifyStatusCode::Unauthorized,
            error_message: None,
        }
    }

    pub fn from_error(err: &ValidatorError) -> Self {
        Self {
            status_code: VerifyStatusCode::Error,
            error_message: Some(err.to_string()),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.status_code == VerifyStatusCode::Authorized
    }
}
