// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Nyaya.
//!
//! Exposes the ask-legal pipeline, per-user history, and account lookup as
//! a JSON API for the mobile client, with permissive CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, HealthState, ServerConfig, router, start_server};
