//! Application configuration module
//!
//! Provides `LiveBlogConfig`, loaded from the environment (optionally via a
//! `.env` file) or assembled with `LiveBlogConfigBuilder`.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_PATH` | `./database/storage.db` |
//! | `SERVER_PORT` | `9000` |
//! | `PUBLIC_DIR` | `public` |
//! | `PUSHER_APP_ID`, `PUSHER_APP_KEY`, `PUSHER_APP_SECRET`, `PUSHER_APP_CLUSTER` | unset |
//! | `PUSHER_SECURE` | `true` |
//! | `PUSHER_HOST` | unset |
//! | `BROADCAST_CHANNEL` | `live-blog-stream` |
//! | `BROADCAST_EVENT` | `new-post` |
//! | `STORE_TIMEOUT_MS` | `5000` |
//! | `BROADCAST_TIMEOUT_MS` | `5000` |
//!
//! The four Pusher credentials go together: either all of them are set and
//! posts are relayed through Pusher, or none is set and the in-process relay
//! is used.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_DATABASE_PATH: &str = "./database/storage.db";
pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_CHANNEL: &str = "live-blog-stream";
pub const DEFAULT_EVENT: &str = "new-post";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Credentials and endpoint of a Pusher-compatible relay
#[derive(Clone, PartialEq, Eq)]
pub struct PusherConfig {
    pub app_id: String,
    pub key: String,
    pub secret: String,
    pub cluster: String,
    /// Use `https` when true, `http` otherwise
    pub secure: bool,
    /// Replaces `api-{cluster}.pusher.com`. May carry its own scheme
    /// (`http://127.0.0.1:6001`), in which case `secure` is ignored.
    pub host: Option<String>,
}

impl PusherConfig {
    pub fn new(
        app_id: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            key: key.into(),
            secret: secret.into(),
            cluster: cluster.into(),
            secure: true,
            host: None,
        }
    }

    /// Base URL of the relay's REST API, without a trailing slash
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        match &self.host {
            Some(host) if host.contains("://") => host.trim_end_matches('/').to_string(),
            Some(host) => format!("{}://{}", scheme, host.trim_end_matches('/')),
            None => format!("{}://api-{}.pusher.com", scheme, self.cluster),
        }
    }
}

// The secret stays out of logs.
impl std::fmt::Debug for PusherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PusherConfig")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("cluster", &self.cluster)
            .field("secure", &self.secure)
            .field("host", &self.host)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct LiveBlogConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
    /// Directory holding `index.html` and `admin.html`
    pub public_dir: PathBuf,
    /// External relay; `None` selects the in-process relay
    pub pusher: Option<PusherConfig>,
    /// Channel every new post is published on
    pub channel: String,
    /// Event name every new post is published as
    pub event: String,
    /// Upper bound for a single store call
    pub store_timeout: Duration,
    /// Upper bound for a single publish call
    pub broadcast_timeout: Duration,
}

impl Default for LiveBlogConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            pusher: None,
            channel: DEFAULT_CHANNEL.to_string(),
            event: DEFAULT_EVENT.to_string(),
            store_timeout: DEFAULT_TIMEOUT,
            broadcast_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LiveBlogConfig {
    /// Create a new LiveBlogConfigBuilder
    pub fn builder() -> LiveBlogConfigBuilder {
        LiveBlogConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// `from_env` is this function over `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(path) = get("DATABASE_PATH") {
            builder = builder.database_path(path);
        }
        if let Some(port) = get("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(dir) = get("PUBLIC_DIR") {
            builder = builder.public_dir(dir);
        }
        if let Some(channel) = get("BROADCAST_CHANNEL") {
            builder = builder.channel(channel);
        }
        if let Some(event) = get("BROADCAST_EVENT") {
            builder = builder.event(event);
        }
        if let Some(ms) = get("STORE_TIMEOUT_MS") {
            builder = builder.store_timeout(Duration::from_millis(parse_value("STORE_TIMEOUT_MS", &ms)?));
        }
        if let Some(ms) = get("BROADCAST_TIMEOUT_MS") {
            builder = builder
                .broadcast_timeout(Duration::from_millis(parse_value("BROADCAST_TIMEOUT_MS", &ms)?));
        }

        let credentials = [
            ("PUSHER_APP_ID", get("PUSHER_APP_ID")),
            ("PUSHER_APP_KEY", get("PUSHER_APP_KEY")),
            ("PUSHER_APP_SECRET", get("PUSHER_APP_SECRET")),
            ("PUSHER_APP_CLUSTER", get("PUSHER_APP_CLUSTER")),
        ];
        if credentials.iter().any(|(_, value)| value.is_some()) {
            if let Some((missing, _)) = credentials.iter().find(|(_, value)| value.is_none()) {
                return Err(ConfigError::MissingValue(*missing));
            }
            let [app_id, key, secret, cluster] = credentials.map(|(_, value)| value.unwrap_or_default());
            let mut pusher = PusherConfig::new(app_id, key, secret, cluster);
            if let Some(secure) = get("PUSHER_SECURE") {
                pusher.secure = parse_bool("PUSHER_SECURE", &secure)?;
            }
            pusher.host = get("PUSHER_HOST");
            builder = builder.pusher(pusher);
        }

        builder.build()
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.trim().is_empty() {
            return Err(ConfigError::MissingValue("BROADCAST_CHANNEL"));
        }
        if self.event.trim().is_empty() {
            return Err(ConfigError::MissingValue("BROADCAST_EVENT"));
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::invalid("STORE_TIMEOUT_MS", "0"));
        }
        if self.broadcast_timeout.is_zero() {
            return Err(ConfigError::invalid("BROADCAST_TIMEOUT_MS", "0"));
        }
        if let Some(pusher) = &self.pusher {
            for (name, value) in [
                ("PUSHER_APP_ID", &pusher.app_id),
                ("PUSHER_APP_KEY", &pusher.key),
                ("PUSHER_APP_SECRET", &pusher.secret),
                ("PUSHER_APP_CLUSTER", &pusher.cluster),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::MissingValue(name));
                }
            }
        }
        Ok(())
    }
}

/// Builder for LiveBlogConfig
#[derive(Debug, Default)]
pub struct LiveBlogConfigBuilder {
    config: LiveBlogConfig,
}

impl LiveBlogConfigBuilder {
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.public_dir = dir.into();
        self
    }

    pub fn pusher(mut self, pusher: PusherConfig) -> Self {
        self.config.pusher = Some(pusher);
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.config.channel = channel.into();
        self
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.config.event = event.into();
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.config.store_timeout = timeout;
        self
    }

    pub fn broadcast_timeout(mut self, timeout: Duration) -> Self {
        self.config.broadcast_timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<LiveBlogConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::invalid(key, raw))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw)),
    }
}
