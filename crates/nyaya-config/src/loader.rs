// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./nyaya.toml` > `~/.config/nyaya/nyaya.toml` > `/etc/nyaya/nyaya.toml`
//! with environment variable overrides via `NYAYA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::NyayaConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/nyaya/nyaya.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "nyaya.toml";

/// Top-level sections, used to turn `NYAYA_<SECTION>_<KEY>` into `section.key`.
const SECTIONS: &[&str] = &["server", "gemini", "cloudinary", "storage", "quota", "history"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/nyaya/nyaya.toml` (system-wide)
/// 3. `~/.config/nyaya/nyaya.toml` (user XDG config)
/// 4. `./nyaya.toml` (local directory)
/// 5. `NYAYA_*` environment variables
pub fn load_config() -> Result<NyayaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<NyayaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NyayaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NyayaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NyayaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(NyayaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("nyaya").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `NYAYA_CLOUDINARY_API_SECRET` must map to
/// `cloudinary.api_secret`, not `cloudinary.api.secret`.
fn env_provider() -> Env {
    Env::prefixed("NYAYA_").map(|key| {
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NYAYA_CLOUDINARY_API_SECRET", "shh");
            jail.set_env("NYAYA_QUOTA_FREE_ATTEMPTS", "7");
            jail.set_env("NYAYA_SERVER_PORT", "9000");

            let config: NyayaConfig = Figment::new()
                .merge(Serialized::defaults(NyayaConfig::default()))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.cloudinary.api_secret.as_deref(), Some("shh"));
            assert_eq!(config.quota.free_attempts, 7);
            assert_eq!(config.server.port, 9000);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                "[history]\npage_size = 4\n\n[gemini]\nmodel = \"gemini-1.5-pro\"\n",
            )?;

            let config = load_config_from_path(Path::new(LOCAL_CONFIG_FILE))?;
            assert_eq!(config.history.page_size, 4);
            assert_eq!(config.gemini.model, "gemini-1.5-pro");
            Ok(())
        });
    }
}
