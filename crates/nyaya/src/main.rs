// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nyaya - a quota-gated legal-assistant backend.
//!
//! This is the binary entry point for the Nyaya server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nyaya_config::{ConfigError, NyayaConfig};

/// Nyaya - a quota-gated legal-assistant backend.
#[derive(Parser, Debug)]
#[command(name = "nyaya", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Load and validate configuration, then exit.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<NyayaConfig, Vec<ConfigError>> {
    match path {
        Some(path) => nyaya_config::load_and_validate_path(path),
        None => nyaya_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            nyaya_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            println!("nyaya: configuration is valid");
            println!("  server:    {}:{}", config.server.host, config.server.port);
            println!("  database:  {}", config.storage.database_path);
            println!("  model:     {}", config.gemini.model);
            println!(
                "  quota:     {} ({} free attempts)",
                if config.quota.enforced { "enforced" } else { "disabled" },
                config.quota.free_attempts
            );
            println!("  history:   {} records per page", config.history.page_size);
        }
    }
}
