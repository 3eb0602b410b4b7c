// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators of the ask pipeline.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod attachment;
pub mod inference;
pub mod storage;

pub use adapter::PluginAdapter;
pub use attachment::AttachmentAdapter;
pub use inference::InferenceAdapter;
pub use storage::StorageAdapter;
