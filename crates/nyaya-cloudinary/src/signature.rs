// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upload request signing.
//!
//! Cloudinary signs the alphabetically sorted `key=value` pairs joined with
//! `&`, with the API secret appended, hashed with SHA-1 and hex-encoded.
//! `file`, `api_key`, `resource_type` and `cloud_name` are never signed.

use sha1::{Digest, Sha1};

/// Computes the signature for `params` (any order).
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
