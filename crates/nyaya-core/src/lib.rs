// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Nyaya legal assistant.
//!
//! This crate provides the trait definitions, error types, and domain types
//! used throughout the Nyaya workspace. Every external collaborator (model,
//! media store, database) is reached through a trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NyayaError;
pub use types::{
    AdapterType, Attachment, FileType, HealthStatus, InferenceRequest, InferenceResponse,
    Language, PromptPart, QaRecord, UploadedFile, UserAccount,
};

pub use traits::{AttachmentAdapter, InferenceAdapter, PluginAdapter, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nyaya_error_has_all_variants() {
        let _invalid = NyayaError::InvalidRequest("test".into());
        let _unauthorized = NyayaError::Unauthorized("test".into());
        let _quota = NyayaError::QuotaExceeded { attempts_left: 0 };
        let _config = NyayaError::Config("test".into());
        let _inference = NyayaError::inference("test");
        let _attachment = NyayaError::attachment("test");
        let _storage = NyayaError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = NyayaError::Internal("test".into());
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(NyayaError::InvalidRequest("x".into()).is_client_error());
        assert!(NyayaError::Unauthorized("x".into()).is_client_error());
        assert!(NyayaError::QuotaExceeded { attempts_left: 0 }.is_client_error());
        assert!(!NyayaError::Config("x".into()).is_client_error());
        assert!(!NyayaError::inference("x").is_client_error());
    }

    #[test]
    fn quota_message_mentions_remaining_attempts() {
        let err = NyayaError::QuotaExceeded { attempts_left: 0 };
        assert_eq!(
            err.to_string(),
            "Free quota exceeded. You have 0 attempts left."
        );
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Inference, AdapterType::Attachment, AdapterType::Storage] {
            let s = variant.to_string();
            assert_eq!(AdapterType::from_str(&s).unwrap(), variant);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_inference_adapter<T: InferenceAdapter>() {}
        fn _assert_attachment_adapter<T: AttachmentAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
    }
}
