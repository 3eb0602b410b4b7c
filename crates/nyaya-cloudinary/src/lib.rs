// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloudinary attachment relay for Nyaya.
//!
//! Implements [`AttachmentAdapter`] by uploading the attachment as a `data:`
//! URI through a signed `auto/upload` request and returning its `secure_url`.

pub mod client;
pub mod signature;

use std::time::Duration;

use async_trait::async_trait;
use nyaya_config::model::CloudinaryConfig;
use nyaya_core::error::NyayaError;
use nyaya_core::traits::{AttachmentAdapter, PluginAdapter};
use nyaya_core::types::{AdapterType, Attachment, HealthStatus, UploadedFile};
use tracing::{debug, info};

use crate::client::{CloudinaryClient, Credentials};

/// Environment variables consulted for credentials left unset in config.
pub const CLOUD_NAME_ENV: &str = "CLOUDINARY_CLOUD_NAME";
pub const API_KEY_ENV: &str = "CLOUDINARY_API_KEY";
pub const API_SECRET_ENV: &str = "CLOUDINARY_API_SECRET";

/// Cloudinary relay implementing [`AttachmentAdapter`].
pub struct CloudinaryRelay {
    client: CloudinaryClient,
    folder: String,
}

impl CloudinaryRelay {
    /// Creates a relay from the `[cloudinary]` config section.
    ///
    /// Returns [`NyayaError::Config`] when any credential is missing from
    /// both the config and the environment.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, NyayaError> {
        let credentials = resolve_credentials(config, |name| std::env::var(name).ok())?;
        let cloud_name = credentials.cloud_name.clone();
        let client = CloudinaryClient::new(
            credentials,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(cloud_name = %cloud_name, folder = %config.folder, "Cloudinary relay initialized");
        Ok(Self {
            client,
            folder: config.folder.clone(),
        })
    }
}

#[async_trait]
impl PluginAdapter for CloudinaryRelay {
    fn name(&self) -> &str {
        "cloudinary"
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
        debug!("Cloudinary relay shutting down");
        Ok(())
    }
}

#[async_trait]
impl AttachmentAdapter for CloudinaryRelay {
    async fn upload(&self, attachment: &Attachment) -> Result<UploadedFile, NyayaError> {
        let timestamp = chrono::Utc::now().timestamp();
        let response = self
            .client
            .upload(&attachment.data_uri(), &self.folder, timestamp)
            .await?;

        debug!(
            public_id = response.public_id.as_deref().unwrap_or(""),
            mime_type = %attachment.mime_type,
            "attachment uploaded"
        );
        Ok(UploadedFile {
            url: response.secure_url,
        })
    }
}

/// Resolves each credential from config, falling back to `lookup(env_var)`.
fn resolve_credentials(
    config: &CloudinaryConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, NyayaError> {
    let pick = |value: &Option<String>, env: &str| -> Result<String, NyayaError> {
        value
            .clone()
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(env).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                NyayaError::Config(format!(
                    "Cloudinary credential missing. Set it in the [cloudinary] config section or the {env} environment variable."
                ))
            })
    };

    Ok(Credentials {
        cloud_name: pick(&config.cloud_name, CLOUD_NAME_ENV)?,
        api_key: pick(&config.api_key, API_KEY_ENV)?,
        api_secret: pick(&config.api_secret, API_SECRET_ENV)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn full_config(base_url: &str) -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: Some("demo".into()),
            api_key: Some("key".into()),
            api_secret: Some("secret".into()),
            base_url: base_url.to_string(),
            ..CloudinaryConfig::default()
        }
    }

    #[test]
    fn credentials_come_from_config_first() {
        let creds = resolve_credentials(&full_config("http://x"), |_| Some("env".into())).unwrap();
        assert_eq!(creds.cloud_name, "demo");
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.api_secret, "secret");
    }

    #[test]
    fn credentials_fall_back_to_env() {
        let config = CloudinaryConfig {
            cloud_name: Some("demo".into()),
            ..CloudinaryConfig::default()
        };
        let creds = resolve_credentials(&config, |name| match name {
            API_KEY_ENV => Some("env-key".into()),
            API_SECRET_ENV => Some("env-secret".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.cloud_name, "demo");
        assert_eq!(creds.api_key, "env-key");
        assert_eq!(creds.api_secret, "env-secret");
    }

    #[test]
    fn missing_credential_names_the_env_var() {
        let err = resolve_credentials(&CloudinaryConfig::default(), |_| None).unwrap_err();
        assert!(matches!(err, NyayaError::Config(_)));
        assert!(err.to_string().contains(CLOUD_NAME_ENV), "got: {err}");
    }

    #[tokio::test]
    async fn upload_returns_secure_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/auto/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/raw/upload/legal-app/doc.pdf"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let relay = CloudinaryRelay::new(&full_config(&server.uri())).unwrap();
        assert_eq!(relay.name(), "cloudinary");
        assert_eq!(relay.adapter_type(), AdapterType::Attachment);

        let uploaded = relay
            .upload(&Attachment::new("JVBERi0=", "application/pdf"))
            .await
            .unwrap();
        assert_eq!(
            uploaded.url,
            "https://res.cloudinary.com/demo/raw/upload/legal-app/doc.pdf"
        );
    }

    #[tokio::test]
    async fn upload_failure_is_attachment_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let relay = CloudinaryRelay::new(&full_config(&server.uri())).unwrap();
        let err = relay
            .upload(&Attachment::new("aGk=", "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, NyayaError::Attachment { .. }));
    }
}
