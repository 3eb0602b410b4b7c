// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite).

use async_trait::async_trait;

use crate::error::NyayaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{QaRecord, UserAccount};

/// Adapter for the account and question/answer stores.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), NyayaError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), NyayaError>;

    // --- Account operations ---

    /// Fetches an account by federated identity id.
    async fn get_user(&self, firebase_uid: &str) -> Result<Option<UserAccount>, NyayaError>;

    /// Fetches an account, creating it with `default_attempts` if it does not exist.
    ///
    /// `email` is only stored when the account is created.
    async fn get_or_create_user(
        &self,
        firebase_uid: &str,
        email: &str,
        default_attempts: i64,
    ) -> Result<UserAccount, NyayaError>;

    // --- Question/answer operations ---

    /// Persists an answered question and charges the account in one transaction.
    ///
    /// When `charge` is true the account's attempts are decremented
    /// conditionally; if no attempt is left the transaction is rolled back
    /// and [`NyayaError::QuotaExceeded`] is returned. When `charge` is false
    /// only `last_login` is bumped. Returns the account's `attempts_left`
    /// after the commit.
    async fn commit_answer(&self, record: &QaRecord, charge: bool) -> Result<i64, NyayaError>;

    /// Lists a user's records, newest first, at most `limit` entries.
    async fn list_qa_records(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<QaRecord>, NyayaError>;
}
