use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Complete ConfHub configuration. Every section falls back to its defaults.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub runtime: RuntimeConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub conferences: ConferenceDefaults,
    pub announcements: AnnouncementConfig,
}

/// Arc-wrapped config for inexpensive cloning into slices and workers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths (PEM).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Tokio runtime knobs for the server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// `None` uses one worker per core.
    pub worker_threads: Option<usize>,
    pub thread_name: String,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials; leave unset for `mem://`.
    pub credentials: Option<DatabaseCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt: JwtConfig,
}

/// Bearer token validation (HS256).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: Option<String>,
    pub ttl_seconds: u64,
    pub clock_skew_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra filter directives, e.g. `confhub=debug,tower_http=info`.
    pub filter: Option<String>,
    /// Enables daily rolling log files in this directory.
    pub directory: Option<PathBuf>,
    /// Write log files as JSON lines.
    pub json: bool,
}

/// Values applied to a new conference when the organizer leaves them out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConferenceDefaults {
    pub default_city: String,
    pub default_max_attendees: i64,
    pub default_topics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    pub refresh_seconds: u64,
    /// Conferences with at most this many seats left (and at least one) are "nearly sold out".
    pub nearly_sold_out_threshold: i64,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { worker_threads: None, thread_name: "confhub-worker".to_owned() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "confhub".to_owned(),
            database: "core".to_owned(),
            credentials: None,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "dev-only-change-me".to_owned(),
            issuer: "confhub".to_owned(),
            audience: None,
            ttl_seconds: 3600,
            clock_skew_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}

impl Default for ConferenceDefaults {
    fn default() -> Self {
        Self {
            default_city: "Tokyo".to_owned(),
            default_max_attendees: 10,
            default_topics: vec!["Web Technologies".to_owned(), "Programming Languages".to_owned()],
        }
    }
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self { refresh_seconds: 3600, nearly_sold_out_threshold: 5 }
    }
}
