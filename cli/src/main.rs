//! Usuarios API — CLI Server
//!
//! ```sh
//! # Run with default config (~/.config/usuarios-api/config.toml)
//! usuarios-api
//!
//! # Custom config path, no MongoDB needed
//! usuarios-api --config ./config.toml --memory
//!
//! # Write a default config file and exit
//! usuarios-api --init-config
//!
//! # Validate config without starting
//! usuarios-api --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use usuarios_api::config::{AppConfig, StorageBackend};
use usuarios_api::server::{init_tracing, ServerHandle, ServerOptions};

/// REST API for usuario records backed by MongoDB.
#[derive(Parser, Debug)]
#[command(
    name = "usuarios-api",
    version,
    about = "Usuario CRUD REST service",
    long_about = "Usuarios API — REST service for creating, listing, updating and deleting \
                  usuario records with bcrypt-hashed passwords.\n\n\
                  Default config: ~/.config/usuarios-api/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "USUARIOS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use the in-memory store instead of MongoDB.
    #[arg(long)]
    memory: bool,

    /// Do not install the Prometheus recorder or expose /metrics.
    #[arg(long)]
    no_metrics: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(usuarios_api::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── CLI overrides ──────────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.memory {
        config.database.backend = StorageBackend::Memory;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if cli.init_config {
        config.save(&config_path)?;
        info!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    if cli.check {
        config.validate()?;
        info!("✅ Configuration is valid");
        return Ok(());
    }

    let handle = match ServerHandle::start(ServerOptions {
        config,
        enable_metrics: !cli.no_metrics,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");
    handle.wait().await;

    Ok(())
}
