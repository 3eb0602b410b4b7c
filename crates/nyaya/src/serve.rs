// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nyaya serve` command implementation.
//!
//! Opens SQLite storage, wires the Gemini and Cloudinary adapters into the
//! ask-legal service, and serves the HTTP gateway until SIGINT/SIGTERM.

use std::sync::Arc;

use nyaya_agent::AskLegalService;
use nyaya_agent::shutdown;
use nyaya_cloudinary::CloudinaryRelay;
use nyaya_config::model::NyayaConfig;
use nyaya_core::error::NyayaError;
use nyaya_core::StorageAdapter;
use nyaya_gateway::{GatewayState, ServerConfig};
use nyaya_gemini::GeminiProvider;
use nyaya_storage::SqliteStorage;
use tracing::{error, info, warn};

/// Runs the `nyaya serve` command.
pub async fn run_serve(config: NyayaConfig) -> Result<(), NyayaError> {
    init_tracing(&config.server.log_level);

    info!("starting nyaya serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let mut service = AskLegalService::new(storage.clone(), &config);

    match GeminiProvider::new(&config.gemini) {
        Ok(provider) => service = service.with_inference(Arc::new(provider)),
        Err(e) => warn!(
            error = %e,
            "Gemini provider unavailable, /ask-legal will answer with a configuration error"
        ),
    }

    match CloudinaryRelay::new(&config.cloudinary) {
        Ok(relay) => service = service.with_attachment_relay(Arc::new(relay)),
        Err(e) => warn!(
            error = %e,
            "Cloudinary relay unavailable, attachments will be answered without a file URL"
        ),
    }

    info!(
        enforced = config.quota.enforced,
        free_attempts = config.quota.free_attempts,
        "quota policy"
    );

    info!(health = ?service.health().await, "service ready");

    let state = GatewayState::new(Arc::new(service));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let cancel = shutdown::install_signal_handler();
    let result = nyaya_gateway::start_server(&server_config, state, cancel).await;

    if let Err(e) = storage.close().await {
        error!(error = %e, "failed to close storage cleanly");
    }

    info!("nyaya serve shutdown complete");
    result
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nyaya={log_level},tower_http={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
