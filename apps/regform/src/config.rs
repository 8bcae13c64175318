//! # Configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config regform.toml`)
//! 3. Environment variables (`REGFORM_*`)
//! 4. CLI flags (applied by the CLI module)
//!
//! ## File format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100          # requests per second, 0 disables
//! cors_origins = "http://localhost:8080"
//! api_key = "secret"        # guards /api/*
//!
//! [storage]
//! backend = "redb"          # or "memory"
//! database = "regform.redb"
//! ```

use regform_core::{RegformError, Registry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

// =============================================================================
// BACKEND
// =============================================================================

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Disk-backed redb database.
    #[default]
    Redb,
    /// Volatile in-memory store.
    Memory,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Redb => "redb",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for Backend {
    type Err = RegformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "memory" => Ok(Self::Memory),
            other => Err(RegformError::InvalidConfig(format!(
                "unknown backend '{}' (expected 'redb' or 'memory')",
                other
            ))),
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients; 0 disables limiting.
    pub rate_limit: u32,
    /// Comma-separated allowed origins, or `*` for any.
    pub cors_origins: Option<String>,
    /// When set, `/api/*` requires `Authorization: Bearer <key>`.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: None,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: Backend,
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Redb,
            database: PathBuf::from("regform.redb"),
        }
    }
}

impl StorageConfig {
    /// Open a registry for the configured backend.
    pub fn open_registry(&self) -> Result<Registry, RegformError> {
        match self.backend {
            Backend::Redb => Registry::with_redb(&self.database),
            Backend::Memory => Ok(Registry::new()),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, RegformError> {
        toml::from_str(content).map_err(|e| RegformError::InvalidConfig(e.to_string()))
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RegformError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RegformError::InvalidConfig(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, RegformError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay `REGFORM_*` variables using the given lookup.
    ///
    /// Empty values are ignored, so `REGFORM_API_KEY=` does not enable auth.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), RegformError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("REGFORM_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("REGFORM_PORT") {
            self.server.port = parse_number("REGFORM_PORT", &port)?;
        }
        if let Some(limit) = get("REGFORM_RATE_LIMIT") {
            self.server.rate_limit = parse_number("REGFORM_RATE_LIMIT", &limit)?;
        }
        if let Some(origins) = get("REGFORM_CORS_ORIGINS") {
            self.server.cors_origins = Some(origins);
        }
        if let Some(key) = get("REGFORM_API_KEY") {
            self.server.api_key = Some(key);
        }
        if let Some(backend) = get("REGFORM_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(database) = get("REGFORM_DATABASE") {
            self.storage.database = PathBuf::from(database);
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, RegformError> {
    raw.trim()
        .parse()
        .map_err(|_| RegformError::InvalidConfig(format!("{} must be a number, got '{}'", key, raw)))
}

// =============================================================================
// TESTS
// =============================================================================
