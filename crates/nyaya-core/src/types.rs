// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and the ask pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Placeholder stored as the question when a request only carries a file.
pub const FILE_ANALYSIS_QUESTION: &str = "File Analysis";

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Inference,
    Attachment,
    Storage,
}

/// Answer language. Anything other than `hindi` is treated as English.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// Interprets the optional language field of a request.
    pub fn from_request(value: Option<&str>) -> Self {
        match value {
            Some("hindi") => Language::Hindi,
            _ => Language::English,
        }
    }

    /// Human-readable name used inside the model prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }
}

/// Coarse classification of an uploaded attachment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Document,
}

impl FileType {
    /// `image/*` media types are images, everything else is a document.
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            FileType::Image
        } else {
            FileType::Document
        }
    }
}

/// A file sent inline with a question, still base64-encoded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Base64 payload without a `data:` prefix.
    pub base64: String,
    /// Declared media type, e.g. `image/png` or `application/pdf`.
    pub mime_type: String,
}

impl Attachment {
    pub fn new(base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Renders the payload as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_mime_type(&self.mime_type)
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("base64", &format_args!("<{} bytes>", self.base64.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One ordered part of a prompt sent to the inference adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    /// Plain prompt text.
    Text(String),
    /// Binary content sent inline, base64-encoded.
    InlineData { mime_type: String, data: String },
}

/// A request to the generative model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub parts: Vec<PromptPart>,
}

/// A response from the generative model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    /// Generated answer text.
    pub text: String,
    /// Model that produced the answer.
    pub model: String,
}

/// Result of a successful attachment upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Public URL of the stored file.
    pub url: String,
}

/// Per-user account tracking the remaining free attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Federated identity subject id.
    pub firebase_uid: String,
    pub email: String,
    pub attempts_left: i64,
    /// ISO 8601 timestamp of the last successful ask (or creation).
    pub last_login: String,
    pub created_at: String,
}

/// One persisted question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub answer: String,
    pub language: Language,
    pub file_url: Option<String>,
    pub file_type: Option<FileType>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn language_from_request_defaults_to_english() {
        assert_eq!(Language::from_request(Some("hindi")), Language::Hindi);
        assert_eq!(Language::from_request(Some("english")), Language::English);
        assert_eq!(Language::from_request(Some("tamil")), Language::English);
        assert_eq!(Language::from_request(Some("Hindi")), Language::English);
        assert_eq!(Language::from_request(None), Language::English);
    }

    #[test]
    fn language_string_forms() {
        assert_eq!(Language::Hindi.to_string(), "hindi");
        assert_eq!(Language::from_str("english").unwrap(), Language::English);
        assert_eq!(Language::Hindi.display_name(), "Hindi");
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hindi\"");
    }

    #[test]
    fn file_type_from_mime_type() {
        assert_eq!(FileType::from_mime_type("image/png"), FileType::Image);
        assert_eq!(FileType::from_mime_type("image/jpeg"), FileType::Image);
        assert_eq!(FileType::from_mime_type("application/pdf"), FileType::Document);
        assert_eq!(FileType::from_mime_type("text/plain"), FileType::Document);
        assert_eq!(FileType::from_mime_type(""), FileType::Document);
        assert_eq!(FileType::Document.to_string(), "document");
    }

    #[test]
    fn attachment_data_uri_and_debug() {
        let attachment = Attachment::new("aGVsbG8=", "image/png");
        assert_eq!(attachment.data_uri(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(attachment.file_type(), FileType::Image);

        let debug = format!("{attachment:?}");
        assert!(!debug.contains("aGVsbG8="), "payload must not be logged: {debug}");
        assert!(debug.contains("image/png"));
    }
}
