// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Nyaya REST API.
//!
//! Handles POST /ask-legal, GET /history, GET /user and GET /health.
//! Bodies use camelCase keys, except `created_at` in history items.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use nyaya_agent::AskRequest;
use nyaya_core::{Attachment, FileType, HealthStatus, Language, QaRecord};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /ask-legal.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskLegalBody {
    #[serde(default)]
    pub question: Option<String>,
    /// `english` or `hindi`; anything else means English.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub file: Option<FileBody>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Stored only when the account is first created.
    #[serde(default)]
    pub email: Option<String>,
}

/// Inline attachment in an ask body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBody {
    #[serde(default)]
    pub base64: String,
    #[serde(default)]
    pub mime_type: String,
}

impl From<AskLegalBody> for AskRequest {
    fn from(body: AskLegalBody) -> Self {
        AskRequest {
            question: body.question,
            language: body.language,
            file: body.file.map(|f| Attachment::new(f.base64, f.mime_type)),
            user_id: body.user_id,
            email: body.email,
        }
    }
}

/// Response body for POST /ask-legal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskLegalResponse {
    pub answer: String,
    pub question: String,
    pub language: Language,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    pub attempts_left: i64,
}

/// Query string shared by GET /history and GET /user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body for GET /history.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

/// One exchange in a history listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(rename = "created_at")]
    pub created_at: String,
}

impl From<QaRecord> for HistoryItem {
    fn from(record: QaRecord) -> Self {
        Self {
            id: record.id,
            question: record.question,
            answer: record.answer,
            language: record.language,
            file_url: record.file_url,
            file_type: record.file_type,
            created_at: record.created_at,
        }
    }
}

/// Response body for GET /user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub attempts_left: i64,
    pub email: String,
    pub last_login: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Why the service is not fully healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthResponse {
    /// Unhealthy maps to 503, degraded still answers 200.
    fn from_status(status: HealthStatus, uptime_secs: u64) -> (StatusCode, Self) {
        let (code, label, detail) = match status {
            HealthStatus::Healthy => (StatusCode::OK, "ok", None),
            HealthStatus::Degraded(reason) => (StatusCode::OK, "degraded", Some(reason)),
            HealthStatus::Unhealthy(reason) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", Some(reason))
            }
        };
        let body = Self {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs,
            detail,
        };
        (code, body)
    }
}

/// POST /ask-legal
///
/// Runs one question through the ask pipeline. A body that is not valid
/// JSON is rejected with 400.
pub async fn post_ask_legal(
    State(state): State<GatewayState>,
    body: Result<Json<AskLegalBody>, JsonRejection>,
) -> Result<Json<AskLegalResponse>, ApiError> {
    let Json(body) = body?;
    let response = state.service.ask(body.into()).await?;
    Ok(Json(AskLegalResponse {
        answer: response.answer,
        question: response.question,
        language: response.language,
        id: response.id,
        file_url: response.file_url,
        file_type: response.file_type,
        attempts_left: response.attempts_left,
    }))
}

/// GET /history?userId=...
pub async fn get_history(
    State(state): State<GatewayState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let records = state.service.history(query.user_id.as_deref()).await?;
    Ok(Json(HistoryResponse {
        history: records.into_iter().map(HistoryItem::from).collect(),
    }))
}

/// GET /user?userId=...&email=...
pub async fn get_user(
    State(state): State<GatewayState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let info = state
        .service
        .user_info(query.user_id.as_deref(), query.email.as_deref())
        .await?;
    Ok(Json(UserResponse {
        attempts_left: info.attempts_left,
        email: info.email,
        last_login: info.last_login,
    }))
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime_secs = state.health.start_time.elapsed().as_secs();
    let (code, body) = HealthResponse::from_status(state.service.health().await, uptime_secs);
    (code, Json(body))
}
