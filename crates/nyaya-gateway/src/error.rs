// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of [`NyayaError`] onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nyaya_core::NyayaError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A handler error rendered as `{ "error": ... }` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub NyayaError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if !self.0.is_client_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match &self.0 {
            NyayaError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            NyayaError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            NyayaError::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NyayaError> for ApiError {
    fn from(err: NyayaError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(NyayaError::InvalidRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (NyayaError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (NyayaError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (
                NyayaError::QuotaExceeded { attempts_left: 0 },
                StatusCode::FORBIDDEN,
            ),
            (
                NyayaError::Config("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (NyayaError::inference("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                NyayaError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn only_client_errors_get_4xx() {
        let errors = [
            NyayaError::InvalidRequest("x".into()),
            NyayaError::Unauthorized("x".into()),
            NyayaError::QuotaExceeded { attempts_left: 0 },
            NyayaError::Config("x".into()),
            NyayaError::attachment("x"),
            NyayaError::Storage {
                source: Box::new(std::io::Error::other("disk")),
            },
        ];
        for err in errors {
            let client = err.is_client_error();
            let status = ApiError(err).status();
            assert_eq!(status.is_client_error(), client, "{status}");
            assert_eq!(status.is_server_error(), !client, "{status}");
        }
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "something went wrong".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"something went wrong"}"#);
    }
}
