// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ask-legal orchestration for Nyaya.
//!
//! The [`AskLegalService`] is the central coordinator that:
//! - Validates an incoming question and resolves the asking account
//! - Gates on the free-usage quota
//! - Relays an optional attachment and asks the model for an answer
//! - Persists the exchange and charges the account in one transaction

pub mod prompt;
pub mod quota;
pub mod service;
pub mod shutdown;

pub use quota::QuotaPolicy;
pub use service::{AskLegalService, AskRequest, AskResponse, UserInfo};
