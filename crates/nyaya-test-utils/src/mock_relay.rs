// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock attachment relay that records uploads.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nyaya_core::NyayaError;
use nyaya_core::traits::adapter::PluginAdapter;
use nyaya_core::traits::attachment::AttachmentAdapter;
use nyaya_core::types::{AdapterType, Attachment, HealthStatus, UploadedFile};

/// Default URL returned for successful uploads.
pub const MOCK_FILE_URL: &str = "https://files.example.test/legal-app/mock-upload";

/// A relay that either always succeeds with a fixed URL or always fails.
pub struct MockAttachmentRelay {
    url: Option<String>,
    uploads: Arc<Mutex<Vec<Attachment>>>,
}

impl MockAttachmentRelay {
    /// Relay that succeeds with [`MOCK_FILE_URL`].
    pub fn new() -> Self {
        Self::with_url(MOCK_FILE_URL)
    }

    /// Relay that succeeds with the given URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Relay whose every upload fails.
    pub fn failing() -> Self {
        Self {
            url: None,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every attachment received, including failed uploads.
    pub async fn uploads(&self) -> Vec<Attachment> {
        self.uploads.lock().await.clone()
    }
}

impl Default for MockAttachmentRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockAttachmentRelay {
    fn name(&self) -> &str {
        "mock-relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Attachment
    }

    async fn health_check(&self) -> Result<HealthStatus, NyayaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NyayaError> {
        Ok(())
    }
}

#[async_trait]
impl AttachmentAdapter for MockAttachmentRelay {
    async fn upload(&self, attachment: &Attachment) -> Result<UploadedFile, NyayaError> {
        self.uploads.lock().await.push(attachment.clone());
        match &self.url {
            Some(url) => Ok(UploadedFile { url: url.clone() }),
            None => Err(NyayaError::attachment("mock relay failure")),
        }
    }
}
