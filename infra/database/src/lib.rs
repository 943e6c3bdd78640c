//! # Database
//!
//! [SurrealDB](https://surrealdb.com) access for ConfHub.
//!
//! * Any engine reachable through the `any` connector (`mem://`, `ws://`, `http://`).
//! * Health checks with retries before the connection is handed out.
//! * Embedded schema migrations, applied once and guarded by checksums.
//! * Typed repositories for profiles, conferences and sessions (see [`records`]).
//!
//! ## Example
//!
//! ```rust
//! use confhub_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("confhub", "core")
//!         .init()
//!         .await?;
//!
//!     assert!(db.all_conferences().await?.is_empty());
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;
pub mod records;
mod repository;

pub use error::{DatabaseError, DatabaseErrorExt};
use migrations::MigrationRunner;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, trace, warn};

const HEALTH_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// Shared `SurrealDB` handle. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// Fluent connection setup, finished by [`DatabaseBuilder::init`].
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
}

impl DatabaseBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Signs in as a root user after connecting.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Connects, waits for the engine to become healthy, signs in, selects the
    /// namespace/database and applies pending migrations.
    ///
    /// Health checks run up to three times with exponential backoff starting at 500ms.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if the URL, namespace or database is missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or stays unhealthy.
    /// * [`DatabaseError::Auth`] if the credentials are rejected.
    /// * [`DatabaseError::Surreal`] / [`DatabaseError::Migration`] if session activation or a
    ///   migration fails.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = required(self.url, "URL")?;
        let ns = required(self.ns, "Namespace")?;
        let db = required(self.db, "Database")?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        let mut delay = INITIAL_BACKOFF;
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| {
                DatabaseError::Auth { message: e.to_string().into(), context: Some(url.into()) }
            })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        let report = MigrationRunner::new(instance.clone()).run().await?;
        for version in &report.skipped {
            trace!(version, "Migration already applied");
        }
        for version in &report.applied {
            info!(version, "Applied migration");
        }

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}

fn required(value: Option<String>, what: &'static str) -> Result<String, DatabaseError> {
    value.ok_or_else(|| DatabaseError::Validation {
        message: format!("{what} is required").into(),
        context: None,
    })
}
