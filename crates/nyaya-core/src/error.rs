// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Nyaya legal assistant.

use thiserror::Error;

/// The primary error type used across all Nyaya adapter traits and the ask pipeline.
///
/// Variants map one-to-one onto the HTTP status codes the gateway returns:
/// `InvalidRequest` is 400, `Unauthorized` is 401, `QuotaExceeded` is 403 and
/// everything else surfaces as a 500 carrying the error message.
#[derive(Debug, Error)]
pub enum NyayaError {
    /// The caller sent a request that cannot be served (e.g. no question and no file).
    #[error("{0}")]
    InvalidRequest(String),

    /// The request carried no user identity.
    #[error("{0}")]
    Unauthorized(String),

    /// The account has no free attempts left.
    #[error("Free quota exceeded. You have {attempts_left} attempts left.")]
    QuotaExceeded { attempts_left: i64 },

    /// Deployment misconfiguration (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The generative model call failed.
    #[error("inference error: {message}")]
    Inference {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The attachment upload failed.
    #[error("attachment upload error: {message}")]
    Attachment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NyayaError {
    /// Builds an [`NyayaError::Inference`] without an underlying source.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an [`NyayaError::Attachment`] without an underlying source.
    pub fn attachment(message: impl Into<String>) -> Self {
        Self::Attachment {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for errors caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::Unauthorized(_) | Self::QuotaExceeded { .. }
        )
    }
}
