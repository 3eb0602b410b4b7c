// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Nyaya integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockInference`] - Mock model with pre-configured answers
//! - [`MockAttachmentRelay`] - Mock upload relay that records attachments
//! - [`TestHarness`] - Full service over a temp SQLite database

pub mod harness;
pub mod mock_inference;
pub mod mock_relay;

pub use harness::TestHarness;
pub use mock_inference::MockInference;
pub use mock_relay::{MOCK_FILE_URL, MockAttachmentRelay};
