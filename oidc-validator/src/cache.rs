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

//! Single-key cache with a hit counter that drives the refresh policy.

/// The provider key currently trusted by one validator, plus the number of
/// `verify` calls served since the last refresh attempt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyCache {
    public_key_pem: Option<String>,
    hit_count: u64,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hit_count = self.hit_count.saturating_add(1);
    }

    /// A refresh is due when nothing is cached yet, or when a refresh budget is
    /// configured and the hit counter has reached it.
    pub fn refresh_due(&self, hit_before_refresh: Option<u64>) -> bool {
        if self.public_key_pem.is_none() {
            return true;
        }
        match hit_before_refresh {
            Some(limit) => self.hit_count >= limit,
            None => false,
        }
    }

    pub fn reset_hits(&mut self) {
        self.hit_count = 0;
    }

    /// Replace the cached key wholesale.
    pub fn replace(&mut self, public_key_pem: String) {
        self.public_key_pem = Some(public_key_pem);
    }

    pub fn public_key_pem(&self) -> Option<&str> {
        self.public_key_pem.as_deref()
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }
}
