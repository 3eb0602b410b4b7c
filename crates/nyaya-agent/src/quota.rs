// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-usage quota policy.

use nyaya_config::model::QuotaConfig;
use nyaya_core::{NyayaError, UserAccount};

/// Whether asks are gated on remaining attempts, and how many a new account gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub enforced: bool,
    pub free_attempts: i64,
}

impl QuotaPolicy {
    pub fn from_config(config: &QuotaConfig) -> Self {
        Self {
            enforced: config.enforced,
            free_attempts: config.free_attempts,
        }
    }

    /// Rejects an account with no attempts left when the quota is enforced.
    pub fn check(&self, account: &UserAccount) -> Result<(), NyayaError> {
        if self.enforced && account.attempts_left <= 0 {
            return Err(NyayaError::QuotaExceeded {
                attempts_left: account.attempts_left.max(0),
            });
        }
        Ok(())
    }
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self::from_config(&QuotaConfig::default())
    }
}
