//! Reusable server runtime.
//!
//! [`ServerHandle`] encapsulates the full lifecycle: store selection and
//! connection, REST API, metrics recorder, and graceful shutdown. The CLI
//! binary is a thin wrapper over it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use mongodb::Client;
use tracing::{error, info, warn};

use crate::application::UsuarioService;
use crate::config::{AppConfig, DatabaseConfig, StorageBackend};
use crate::domain::UsuarioRepositoryInterface;
use crate::infrastructure::{
    init_database, InMemoryUsuarioRepository, MongoUsuarioRepository, PasswordHasher,
};
use crate::interfaces::create_api_router;
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Install the global Prometheus recorder and expose `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            enable_metrics: true,
        }
    }
}

// ── Store selection ────────────────────────────────────────────────

/// Repository chosen by configuration, plus the client to close on shutdown.
pub struct StoreBundle {
    pub repo: Arc<dyn UsuarioRepositoryInterface>,
    pub client: Option<Client>,
}

/// Build the configured usuario store. For MongoDB this connects, pings,
/// and makes sure the unique `email` index exists.
pub async fn build_store(config: &DatabaseConfig) -> Result<StoreBundle, Box<dyn std::error::Error>> {
    match config.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory store: data is lost on restart");
            Ok(StoreBundle {
                repo: Arc::new(InMemoryUsuarioRepository::new()),
                client: None,
            })
        }
        StorageBackend::Mongodb => {
            let (client, db) = init_database(config).await?;
            let repo = MongoUsuarioRepository::new(&db, &config.collection);
            repo.ensure_indexes().await?;
            Ok(StoreBundle {
                repo: Arc::new(repo),
                client: Some(client),
            })
        }
    }
}

/// The global metrics recorder can only be installed once per process.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder not installed: {}", e);
                None
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use usuarios_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to (useful with port 0).
    pub local_addr: SocketAddr,

    client: Option<Client>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service:
    /// 1. Install the Prometheus recorder (if enabled)
    /// 2. Connect the configured store
    /// 3. Bind and serve the REST API with graceful shutdown
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting Usuarios API...");

        let prometheus = if opts.enable_metrics {
            prometheus_handle()
        } else {
            None
        };

        // ── Store & service ────────────────────────────────────
        let store = build_store(&app_cfg.database).await?;
        let hasher = PasswordHasher::new(app_cfg.security.bcrypt_cost);
        let service = Arc::new(UsuarioService::new(store.repo, hasher));
        info!("bcrypt cost factor: {}", hasher.cost());

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_router = create_api_router(service, prometheus);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            client: store.client,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until shutdown is triggered and the server has drained, bounded
    /// by `server.shutdown_timeout`. Closes the database client afterwards.
    pub async fn wait(self) {
        self.shutdown.signal().wait().await;
        info!(
            "⏳ Waiting for in-flight requests (timeout: {}s)...",
            self.shutdown.timeout_secs()
        );

        let mut api_task = self.api_task;
        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("⚠️ Graceful shutdown timed out after {}s", timeout.as_secs());
                api_task.abort();
            }
        }

        if let Some(client) = self.client {
            client.shutdown().await;
            info!("✅ Database connection closed");
        }

        info!("👋 Usuarios API shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.backend = StorageBackend::Memory;
        config.security.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn starts_and_stops_with_memory_store() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            enable_metrics: false,
        })
        .await
        .unwrap();

        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());

        tokio::time::timeout(Duration::from_secs(10), handle.shutdown())
            .await
            .expect("shutdown should complete");
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let mut config = memory_config();
        config.security.bcrypt_cost = 99;
        let result = ServerHandle::start(ServerOptions {
            config,
            enable_metrics: false,
        })
        .await;
        assert!(result.is_err());
    }
}
