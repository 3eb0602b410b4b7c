// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use nyaya_config::model::StorageConfig;
use nyaya_core::{
    AdapterType, HealthStatus, NyayaError, PluginAdapter, QaRecord, StorageAdapter, UserAccount,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened by [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage. No connection is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, NyayaError> {
        self.db.get().ok_or_else(|| NyayaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, NyayaError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NyayaError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), NyayaError> {
        let path = self.config.database_path.clone();
        let db = Database::open_with(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| NyayaError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), NyayaError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn get_user(&self, firebase_uid: &str) -> Result<Option<UserAccount>, NyayaError> {
        queries::users::get_user(self.db()?, firebase_uid).await
    }

    async fn get_or_create_user(
        &self,
        firebase_uid: &str,
        email: &str,
        default_attempts: i64,
    ) -> Result<UserAccount, NyayaError> {
        queries::users::get_or_create_user(self.db()?, firebase_uid, email, default_attempts).await
    }

    async fn commit_answer(&self, record: &QaRecord, charge: bool) -> Result<i64, NyayaError> {
        queries::qa_records::commit_answer(self.db()?, record, charge)
            .await?
            .ok_or(NyayaError::QuotaExceeded { attempts_left: 0 })
    }

    async fn list_qa_records(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<QaRecord>, NyayaError> {
        queries::qa_records::list_for_user(self.db()?, user_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyaya_core::Language;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninit.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(matches!(
            storage.get_user("u").await,
            Err(NyayaError::Storage { .. })
        ));
        assert!(matches!(
            storage.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn initialize_twice_is_an_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("twice.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists());
        assert!(storage.initialize().await.is_err());
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn commit_answer_maps_exhaustion_to_quota_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("quota.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        storage.get_or_create_user("u1", "u1@example.com", 1).await.unwrap();
        let record = QaRecord {
            id: "r1".into(),
            user_id: "u1".into(),
            question: "q".into(),
            answer: "a".into(),
            language: Language::English,
            file_url: None,
            file_type: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        assert_eq!(storage.commit_answer(&record, true).await.unwrap(), 0);

        let again = QaRecord {
            id: "r2".into(),
            ..record
        };
        let err = storage.commit_answer(&again, true).await.unwrap_err();
        assert!(matches!(err, NyayaError::QuotaExceeded { attempts_left: 0 }));
        assert_eq!(storage.list_qa_records("u1", 10).await.unwrap().len(), 1);

        storage.close().await.unwrap();
        storage.shutdown().await.unwrap();
    }
}
