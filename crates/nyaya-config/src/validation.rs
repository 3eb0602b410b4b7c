// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as a valid bind address, a non-empty database path, and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::NyayaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &NyayaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(validation("server.host must not be empty"));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(validation(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(validation("storage.database_path must not be empty"));
    }

    if config.quota.free_attempts < 0 {
        errors.push(validation(format!(
            "quota.free_attempts must be non-negative, got {}",
            config.quota.free_attempts
        )));
    }

    if config.history.page_size < 1 {
        errors.push(validation(format!(
            "history.page_size must be at least 1, got {}",
            config.history.page_size
        )));
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(validation("gemini.model must not be empty"));
    }

    for (key, url) in [
        ("gemini.base_url", &config.gemini.base_url),
        ("cloudinary.base_url", &config.cloudinary.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(validation(format!(
                "{key} must start with http:// or https://, got `{url}`"
            )));
        }
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(validation("gemini.timeout_secs must be at least 1"));
    }

    if config.cloudinary.timeout_secs == 0 {
        errors.push(validation("cloudinary.timeout_secs must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}
