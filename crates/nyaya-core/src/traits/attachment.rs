// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment relay trait for object-storage providers (Cloudinary).

use async_trait::async_trait;

use crate::error::NyayaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Attachment, UploadedFile};

/// Adapter that stores an uploaded file and hands back a public URL.
///
/// Callers treat failures as best-effort: the ask pipeline logs them and
/// continues without a file URL.
#[async_trait]
pub trait AttachmentAdapter: PluginAdapter {
    /// Uploads the attachment and returns its public URL.
    async fn upload(&self, attachment: &Attachment) -> Result<UploadedFile, NyayaError>;
}
