// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ask-legal pipeline, history listing, and account lookup.
//!
//! [`AskLegalService::ask`] runs one question through validation, the quota
//! gate, the attachment relay, the model, and the transactional commit.
//! Validation happens before any storage or remote call.

use std::sync::Arc;

use nyaya_config::model::NyayaConfig;
use nyaya_core::types::FILE_ANALYSIS_QUESTION;
use nyaya_core::{
    Attachment, AttachmentAdapter, FileType, HealthStatus, InferenceAdapter, Language,
    NyayaError, QaRecord, StorageAdapter,
};
use tracing::{debug, info, warn};

use crate::prompt;
use crate::quota::QuotaPolicy;

/// One incoming question. Every field is optional at this layer so that
/// validation (and its ordering) lives in one place.
#[derive(Debug, Clone, Default)]
pub struct AskRequest {
    pub question: Option<String>,
    pub language: Option<String>,
    pub file: Option<Attachment>,
    pub user_id: Option<String>,
    /// Stored only when the account is first created.
    pub email: Option<String>,
}

/// Result of a successful ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
    /// The stored question (the file-analysis placeholder for file-only asks).
    pub question: String,
    pub language: Language,
    pub id: String,
    pub file_url: Option<String>,
    /// Set only together with `file_url`.
    pub file_type: Option<FileType>,
    pub attempts_left: i64,
}

/// Account summary returned by [`AskLegalService::user_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub attempts_left: i64,
    pub email: String,
    pub last_login: String,
}

/// Coordinates storage, the attachment relay, and the model for each request.
pub struct AskLegalService {
    storage: Arc<dyn StorageAdapter>,
    inference: Option<Arc<dyn InferenceAdapter>>,
    attachments: Option<Arc<dyn AttachmentAdapter>>,
    quota: QuotaPolicy,
    history_page_size: i64,
}

impl AskLegalService {
    /// Creates a service with no model and no relay attached.
    pub fn new(storage: Arc<dyn StorageAdapter>, config: &NyayaConfig) -> Self {
        Self {
            storage,
            inference: None,
            attachments: None,
            quota: QuotaPolicy::from_config(&config.quota),
            history_page_size: config.history.page_size,
        }
    }

    pub fn with_inference(mut self, inference: Arc<dyn InferenceAdapter>) -> Self {
        self.inference = Some(inference);
        self
    }

    pub fn with_attachment_relay(mut self, relay: Arc<dyn AttachmentAdapter>) -> Self {
        self.attachments = Some(relay);
        self
    }

    /// Storage must be up for the service to be healthy. Running without a
    /// model is reported as degraded since history and user lookups still work.
    pub async fn health(&self) -> HealthStatus {
        match self.storage.health_check().await {
            Ok(HealthStatus::Healthy) => {}
            Ok(status) => return status,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        }
        if self.inference.is_none() {
            return HealthStatus::Degraded("inference not configured".into());
        }
        HealthStatus::Healthy
    }

    /// Answers a legal question, charging one attempt on success.
    pub async fn ask(&self, request: AskRequest) -> Result<AskResponse, NyayaError> {
        let question = request.question.filter(|q| !q.trim().is_empty());
        let file = request.file;

        if question.is_none() && file.is_none() {
            return Err(NyayaError::InvalidRequest(
                "Question or file is required".into(),
            ));
        }
        if let Some(f) = &file
            && (f.base64.is_empty() || f.mime_type.is_empty())
        {
            return Err(NyayaError::InvalidRequest(
                "File must include base64 data and a mime type".into(),
            ));
        }
        let user_id = request
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NyayaError::Unauthorized("Unauthorized: User ID required".into()))?;
        let inference = self
            .inference
            .as_ref()
            .ok_or_else(|| NyayaError::Config("Gemini API key not configured".into()))?;

        let language = Language::from_request(request.language.as_deref());
        let account = self
            .storage
            .get_or_create_user(
                &user_id,
                request.email.as_deref().unwrap_or(""),
                self.quota.free_attempts,
            )
            .await?;

        if let Err(e) = self.quota.check(&account) {
            info!(user_id = %user_id, "ask rejected: free quota exhausted");
            return Err(e);
        }

        let prompt_text = prompt::build_prompt(language, question.as_deref(), file.is_some());

        let (file_url, file_type) = match &file {
            Some(f) => self.relay_attachment(f, &user_id).await,
            None => (None, None),
        };

        let inference_request = prompt::build_request(prompt_text, file.as_ref());
        let response = inference
            .generate(inference_request)
            .await
            .map_err(|e| {
                warn!(user_id = %user_id, error = %e, "inference failed");
                match e {
                    NyayaError::Inference { .. } => e,
                    other => NyayaError::Inference {
                        message: other.to_string(),
                        source: Some(Box::new(other)),
                    },
                }
            })?;
        debug!(user_id = %user_id, model = %response.model, "answer generated");

        let record = QaRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            question: question.unwrap_or_else(|| FILE_ANALYSIS_QUESTION.to_string()),
            answer: response.text,
            language,
            file_url,
            file_type,
            created_at: timestamp_now(),
        };

        let attempts_left = match self.storage.commit_answer(&record, self.quota.enforced).await {
            Ok(n) => n,
            Err(e @ NyayaError::QuotaExceeded { .. }) => {
                info!(user_id = %user_id, "last attempt spent by a concurrent request");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        info!(
            user_id = %user_id,
            record_id = %record.id,
            language = %language,
            has_file = record.file_url.is_some(),
            attempts_left,
            "question answered"
        );

        Ok(AskResponse {
            answer: record.answer,
            question: record.question,
            language,
            id: record.id,
            file_url: record.file_url,
            file_type: record.file_type,
            attempts_left,
        })
    }

    /// Lists the user's most recent exchanges, newest first.
    pub async fn history(&self, user_id: Option<&str>) -> Result<Vec<QaRecord>, NyayaError> {
        let user_id = user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NyayaError::Unauthorized("Unauthorized: User ID required".into()))?;
        let records = self
            .storage
            .list_qa_records(user_id, self.history_page_size)
            .await?;
        debug!(user_id, count = records.len(), "history listed");
        Ok(records)
    }

    /// Returns the account, creating it on first contact.
    pub async fn user_info(
        &self,
        user_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<UserInfo, NyayaError> {
        let user_id = user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NyayaError::InvalidRequest("UserId is required".into()))?;
        let account = self
            .storage
            .get_or_create_user(user_id, email.unwrap_or(""), self.quota.free_attempts)
            .await?;
        Ok(UserInfo {
            attempts_left: account.attempts_left,
            email: account.email,
            last_login: account.last_login,
        })
    }

    /// Uploads the attachment. Failures are logged and yield no URL.
    async fn relay_attachment(
        &self,
        file: &Attachment,
        user_id: &str,
    ) -> (Option<String>, Option<FileType>) {
        let Some(relay) = &self.attachments else {
            warn!(user_id, "attachment relay not configured, continuing without file URL");
            return (None, None);
        };
        match relay.upload(file).await {
            Ok(uploaded) => (Some(uploaded.url), Some(file.file_type())),
            Err(e) => {
                warn!(user_id, error = %e, "attachment upload failed, continuing without file URL");
                (None, None)
            }
        }
    }
}

/// Current UTC time as RFC 3339 with millisecond precision.
fn timestamp_now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
