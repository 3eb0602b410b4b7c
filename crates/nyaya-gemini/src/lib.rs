// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini inference adapter for Nyaya.
//!
//! Implements [`InferenceAdapter`] on top of the `generateContent` REST
//! endpoint. Text and inline blobs are sent as a single user turn.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use nyaya_config::model::GeminiConfig;
use nyaya_core::error::NyayaError;
use nyaya_core::traits::{InferenceAdapter, PluginAdapter};
use nyaya_core::types::{
    AdapterType, HealthStatus, InferenceRequest, InferenceResponse, PromptPart,
};
use tracing::{debug, info, warn};

use crate::client::GeminiClient;
use crate::types::{GenerateContentRequest, InlineData, RequestContent, RequestPart};

/// Environment variable consulted when `gemini.api_key` is unset.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini provider implementing [`InferenceAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` config section.
    ///
    /// Returns [`NyayaError::Config`] when no API key can be found.
    pub fn new(config: &GeminiConfig) -> Result<Self, NyayaError> {
        let api_key = resolve_api_key(&config.api_key, std::env::var(API_KEY_ENV).ok())?;
        let client = GeminiClient::new(
            &api_key,
            config.model.clone(),
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = %config.model, "Gemini provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Inference
    }

    async fn health_check(&self) -> Result<HealthStatus, NyayaError> {
        // No probe request: a generate call would spend quota.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NyayaError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl InferenceAdapter for GeminiProvider {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, NyayaError> {
        let api_request = to_generate_request(request);
        let response = self.client.generate_content(&api_request).await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "prompt blocked by Gemini");
            return Err(NyayaError::inference(format!("prompt blocked: {reason}")));
        }

        let text = response
            .text()
            .ok_or_else(|| NyayaError::inference("Gemini returned no answer text"))?;

        Ok(InferenceResponse {
            text,
            model: response
                .model_version
                .unwrap_or_else(|| self.client.model().to_string()),
        })
    }
}

/// Resolves the API key from config, then from the environment value.
fn resolve_api_key(
    config_key: &Option<String>,
    env_key: Option<String>,
) -> Result<String, NyayaError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    env_key.filter(|k| !k.is_empty()).ok_or_else(|| {
        NyayaError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}

/// Maps core prompt parts onto one user turn.
fn to_generate_request(request: InferenceRequest) -> GenerateContentRequest {
    let parts = request
        .parts
        .into_iter()
        .map(|part| match part {
            PromptPart::Text(text) => RequestPart::Text { text },
            PromptPart::InlineData { mime_type, data } => RequestPart::InlineData {
                inline_data: InlineData { mime_type, data },
            },
        })
        .collect();

    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user".into(),
            parts,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GeminiProvider {
        let config = GeminiConfig {
            api_key: Some("test-key".into()),
            base_url: server.uri(),
            ..GeminiConfig::default()
        };
        GeminiProvider::new(&config).unwrap()
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(&Some("from-config".into()), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn resolve_api_key_falls_back_to_env() {
        let key = resolve_api_key(&Some(String::new()), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
        let key = resolve_api_key(&None, Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn resolve_api_key_missing_is_config_error() {
        assert!(matches!(
            resolve_api_key(&None, None),
            Err(NyayaError::Config(_))
        ));
        assert!(matches!(
            resolve_api_key(&None, Some(String::new())),
            Err(NyayaError::Config(_))
        ));
    }

    #[test]
    fn prompt_parts_keep_their_order() {
        let request = to_generate_request(InferenceRequest {
            parts: vec![
                PromptPart::Text("prompt".into()),
                PromptPart::InlineData {
                    mime_type: "application/pdf".into(),
                    data: "JVBERi0=".into(),
                },
            ],
        });
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert!(matches!(&request.contents[0].parts[0], RequestPart::Text { text } if text == "prompt"));
        assert!(matches!(
            &request.contents[0].parts[1],
            RequestPart::InlineData { inline_data } if inline_data.mime_type == "application/pdf"
        ));
    }

    #[tokio::test]
    async fn generate_sends_parts_and_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(body_json(serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "What is an FIR?"},
                        {"inline_data": {"mime_type": "image/jpeg", "data": "/9j/"}}
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "An FIR is..."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let response = provider
            .generate(InferenceRequest {
                parts: vec![
                    PromptPart::Text("What is an FIR?".into()),
                    PromptPart::InlineData {
                        mime_type: "image/jpeg".into(),
                        data: "/9j/".into(),
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(response.text, "An FIR is...");
        assert_eq!(response.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn generate_fails_on_blocked_prompt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .generate(InferenceRequest {
                parts: vec![PromptPart::Text("q".into())],
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_fails_on_empty_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .generate(InferenceRequest {
                parts: vec![PromptPart::Text("q".into())],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NyayaError::Inference { .. }));
    }

    #[tokio::test]
    async fn plugin_adapter_identity() {
        let server = MockServer::start().await;
        let provider = provider_for(&server);
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.adapter_type(), AdapterType::Inference);
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
