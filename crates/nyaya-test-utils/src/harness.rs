// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete [`AskLegalService`] with mock adapters
//! and a temp SQLite database. Provides `ask()` to drive the full pipeline
//! in tests.

use std::sync::Arc;

use nyaya_agent::{AskLegalService, AskRequest, AskResponse};
use nyaya_config::model::{NyayaConfig, StorageConfig};
use nyaya_core::{NyayaError, StorageAdapter};
use nyaya_storage::SqliteStorage;

use crate::mock_inference::MockInference;
use crate::mock_relay::MockAttachmentRelay;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    inference_failing: bool,
    with_inference: bool,
    relay_failing: bool,
    with_relay: bool,
    config: NyayaConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            inference_failing: false,
            with_inference: true,
            relay_failing: false,
            with_relay: true,
            config: NyayaConfig::default(),
        }
    }

    /// Set mock model answers.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Make every model call fail.
    pub fn with_failing_inference(mut self) -> Self {
        self.inference_failing = true;
        self
    }

    /// Leave the service without a model, as with a missing API key.
    pub fn without_inference(mut self) -> Self {
        self.with_inference = false;
        self
    }

    /// Make every attachment upload fail.
    pub fn with_failing_relay(mut self) -> Self {
        self.relay_failing = true;
        self
    }

    /// Leave the service without an attachment relay.
    pub fn without_relay(mut self) -> Self {
        self.with_relay = false;
        self
    }

    /// Attempts granted to new accounts.
    pub fn with_free_attempts(mut self, attempts: i64) -> Self {
        self.config.quota.free_attempts = attempts;
        self
    }

    /// Disable quota gating and charging.
    pub fn with_quota_disabled(mut self) -> Self {
        self.config.quota.enforced = false;
        self
    }

    /// Maximum records returned by a history query.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.config.history.page_size = page_size;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, NyayaError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| NyayaError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

        let mock_inference = Arc::new(MockInference::with_responses(self.responses));
        mock_inference.set_failing(self.inference_failing);

        let mock_relay = Arc::new(if self.relay_failing {
            MockAttachmentRelay::failing()
        } else {
            MockAttachmentRelay::new()
        });

        let mut service = AskLegalService::new(storage.clone(), &config);
        if self.with_inference {
            service = service.with_inference(mock_inference.clone());
        }
        if self.with_relay {
            service = service.with_attachment_relay(mock_relay.clone());
        }

        Ok(TestHarness {
            service: Arc::new(service),
            storage,
            mock_inference,
            mock_relay,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// The service under test.
    pub service: Arc<AskLegalService>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<dyn StorageAdapter>,
    /// The mock model.
    pub mock_inference: Arc<MockInference>,
    /// The mock attachment relay.
    pub mock_relay: Arc<MockAttachmentRelay>,
    /// Configuration the service was built from.
    pub config: NyayaConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Ask a text question as `user_id`.
    pub async fn ask(&self, question: &str, user_id: &str) -> Result<AskResponse, NyayaError> {
        self.service
            .ask(AskRequest {
                question: Some(question.to_string()),
                user_id: Some(user_id.to_string()),
                ..AskRequest::default()
            })
            .await
    }

    /// Remaining attempts for `user_id`, if the account exists.
    pub async fn attempts_left(&self, user_id: &str) -> Result<Option<i64>, NyayaError> {
        Ok(self
            .storage
            .get_user(user_id)
            .await?
            .map(|u| u.attempts_left))
    }
}
