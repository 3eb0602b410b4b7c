// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Cloudinary upload API.

use std::time::Duration;

use nyaya_core::NyayaError;
use serde::Deserialize;
use tracing::debug;

use crate::signature;

/// Resolved upload credentials.
#[derive(Clone)]
pub struct Credentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

/// Successful upload response (only the fields Nyaya reads).
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Signed-upload client for one cloud.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl CloudinaryClient {
    pub fn new(
        credentials: Credentials,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, NyayaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NyayaError::Attachment {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.base_url, self.credentials.cloud_name
        )
    }

    /// Uploads a `data:` URI into `folder` with public access.
    ///
    /// `timestamp` is Unix seconds and is part of the signature.
    pub async fn upload(
        &self,
        data_uri: &str,
        folder: &str,
        timestamp: i64,
    ) -> Result<UploadResponse, NyayaError> {
        let timestamp = timestamp.to_string();
        let signature = signature::sign(
            &[
                ("access_mode", "public"),
                ("folder", folder),
                ("timestamp", &timestamp),
            ],
            &self.credentials.api_secret,
        );

        let form = [
            ("file", data_uri),
            ("folder", folder),
            ("access_mode", "public"),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.credentials.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint())
            .form(&form[..])
            .send()
            .await
            .map_err(|e| NyayaError::Attachment {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "upload response received");

        let body = response.text().await.map_err(|e| NyayaError::Attachment {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("Cloudinary API error ({status}): {}", api_err.error.message),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(NyayaError::attachment(message));
        }

        serde_json::from_str(&body).map_err(|e| NyayaError::Attachment {
            message: format!("failed to parse upload response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
