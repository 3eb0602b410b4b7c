// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock inference adapter for deterministic testing.
//!
//! `MockInference` implements `InferenceAdapter` with pre-configured answers,
//! enabling fast, CI-runnable tests without calling the model API.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use nyaya_core::NyayaError;
use nyaya_core::traits::adapter::PluginAdapter;
use nyaya_core::traits::inference::InferenceAdapter;
use nyaya_core::types::{AdapterType, HealthStatus, InferenceRequest, InferenceResponse};

/// A mock model that returns pre-configured answers.
///
/// Answers are popped from a FIFO queue. When the queue is empty,
/// a default "mock answer" text is returned. Every request is recorded.
pub struct MockInference {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MockInference {
    /// Create a new mock with an empty answer queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock pre-loaded with the given answers.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose every call fails with an inference error.
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.set_failing(true);
        mock
    }

    /// Toggle failure mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Add an answer to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Number of `generate` calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in order.
    pub async fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock answer".to_string())
    }
}

impl Default for MockInference {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockInference {
    fn name(&self) -> &str {
        "mock-inference"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Inference
    }

    async fn health_check(&self) -> Result<HealthStatus, NyayaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NyayaError> {
        Ok(())
    }
}

#[async_trait]
impl InferenceAdapter for MockInference {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, NyayaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        if self.failing.load(Ordering::SeqCst) {
            return Err(NyayaError::inference("mock inference failure"));
        }
        Ok(InferenceResponse {
            text: self.next_response().await,
            model: "mock-model".to_string(),
        })
    }
}
