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

//! Shared state handed to the authentication middleware.

use std::sync::Arc;

use crate::validator::OidcValidator;

#[derive(Clone)]
pub struct AppState {
    /// One validator (and therefore one key cache) shared by every request.
    pub validator: Arc<OidcValidator>,
}

impl AppState {
    pub fn new(validator: OidcValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}
