// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Nyaya legal assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Nyaya configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NyayaConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini inference settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Cloudinary attachment relay settings.
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Free-usage quota settings.
    #[serde(default)]
    pub quota: QuotaConfig,

    /// History listing settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP server to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for every answer.
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for proxies and tests).
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// HTTP timeout for a single generate call, in seconds.
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    120
}

/// Cloudinary upload configuration.
///
/// Credentials left unset fall back to `CLOUDINARY_CLOUD_NAME`,
/// `CLOUDINARY_API_KEY` and `CLOUDINARY_API_SECRET`.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CloudinaryConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    /// Folder uploads are placed in.
    #[serde(default = "default_cloudinary_folder")]
    pub folder: String,

    /// API base URL (overridable for tests).
    #[serde(default = "default_cloudinary_base_url")]
    pub base_url: String,

    /// HTTP timeout for a single upload, in seconds.
    #[serde(default = "default_cloudinary_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            folder: default_cloudinary_folder(),
            base_url: default_cloudinary_base_url(),
            timeout_secs: default_cloudinary_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[redacted]"))
            .field("folder", &self.folder)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_cloudinary_folder() -> String {
    "legal-app".to_string()
}

fn default_cloudinary_base_url() -> String {
    "https://api.cloudinary.com".to_string()
}

fn default_cloudinary_timeout_secs() -> u64 {
    60
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("nyaya").join("nyaya.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("nyaya.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Free-usage quota configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaConfig {
    /// Whether asks are gated on and charged against `attempts_left`.
    #[serde(default = "default_quota_enforced")]
    pub enforced: bool,

    /// Attempts granted to a newly created account.
    #[serde(default = "default_free_attempts")]
    pub free_attempts: i64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            enforced: default_quota_enforced(),
            free_attempts: default_free_attempts(),
        }
    }
}

fn default_quota_enforced() -> bool {
    true
}

fn default_free_attempts() -> i64 {
    3
}

/// History listing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of records returned by one history query.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> i64 {
    10
}
