//! # ConfHub Server
//!
//! Binds the conference API: connects the store, starts the feature slices and serves the
//! router over HTTP or HTTPS until Ctrl+C / SIGTERM.
//!
//! ## Example
//! ```no_run
//! use confhub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().port(4583).build().await?.run().await
//! }
//! ```

mod router;

use anyhow::{Context, Result, bail};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use confhub::domain::config::{ApiConfig, SslConfig};
use confhub::kernel::server::ApiState;
use confhub_database::Database;
use confhub_event_bus::EventBus;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// In-flight requests get this long to finish once shutdown starts.
const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Configures and starts a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    database: Option<Database>,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Reuses an open connection instead of connecting from `database` config.
    pub fn database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Checks TLS files, connects the store, starts every feature slice and assembles the
    /// shared state.
    ///
    /// # Errors
    /// * A configured certificate or key file is missing.
    /// * The database cannot be reached or migrated.
    /// * A feature slice cannot claim its event queues.
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(%address, "Initializing server");

        let database = match self.database {
            Some(database) => database,
            None => connect(&self.cfg).await?,
        };

        let events = EventBus::new();
        let slices =
            confhub::init(&self.cfg, &database, &events).context("Feature slices failed to start")?;

        let state = ApiState::builder()
            .config(self.cfg)
            .db(database)
            .events(events)
            .register_slices(slices)
            .build()
            .context("Failed to assemble API state")?;
        info!(slices = state.slice_count(), "API state assembled");

        Ok(Server { state, address })
    }
}

/// An initialized server: state is built, workers are running, nothing is bound yet.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
    address: SocketAddr,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Serves until a shutdown signal arrives, then drains connections and stops the slices.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the TLS material does not load.
    pub async fn run(self) -> Result<()> {
        let app = self.router().into_make_service();
        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(graceful_shutdown(handle.clone()));

        match &self.state.config.server.ssl {
            Some(ssl) => {
                info!("Listening on https://{}", self.address);
                let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load TLS certificate and key")?;
                axum_server::bind_rustls(self.address, tls)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTPS listener failed")?;
            },
            None => {
                info!("Listening on http://{}", self.address);
                axum_server::bind(self.address)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTP listener failed")?;
            },
        }

        confhub::shutdown(&self.state);
        info!("Server stopped");
        Ok(())
    }

    /// The full application router, without binding a socket.
    pub fn router(&self) -> axum::Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.address
    }
}

async fn connect(cfg: &ApiConfig) -> Result<Database> {
    let db = &cfg.database;
    let mut builder = Database::builder().url(&db.url).session(&db.namespace, &db.database);
    if let Some(credentials) = &db.credentials {
        builder = builder.auth(&credentials.username, &credentials.password);
    }

    builder.init().await.context("Failed to establish database connection")
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    for (label, path) in [("certificate", &ssl.cert), ("key", &ssl.key)] {
        if !path.exists() {
            bail!("TLS {label} not found at: {}", path.display());
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if ssl.key.metadata()?.permissions().mode() & 0o077 != 0 {
            tracing::warn!(key = %ssl.key.display(), "TLS private key is readable by other users");
        }
    }

    Ok(())
}

async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(()) => {
            info!(grace_seconds = GRACE_PERIOD.as_secs(), "Shutdown signal received");
            handle.graceful_shutdown(Some(GRACE_PERIOD));
        },
        Err(e) => error!("Error while waiting for shutdown signal: {e}"),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}
