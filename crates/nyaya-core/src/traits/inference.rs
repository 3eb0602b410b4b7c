// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inference adapter trait for hosted generative models (Gemini).

use async_trait::async_trait;

use crate::error::NyayaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InferenceRequest, InferenceResponse};

/// Adapter for generative-model integrations.
///
/// Any error returned from [`generate`](InferenceAdapter::generate) is fatal to
/// the enclosing ask request.
#[async_trait]
pub trait InferenceAdapter: PluginAdapter {
    /// Sends the ordered prompt parts and returns the generated text.
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, NyayaError>;
}
