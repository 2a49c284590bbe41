// Configuration module entry point
// Layered loading: defaults, optional TOML file, FRONTDOOR__* environment,
// then the SERVER_PORT / WEBSITE_PORT port override.

mod types;

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logger;

// Re-export public types
pub use types::{Config, LoggingConfig, PathsConfig, PerformanceConfig, ServerConfig};

/// Config file used when `FRONTDOOR_CONFIG` is not set (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "frontdoor";

/// Port used when neither the environment nor the config file sets one
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variables consulted, in order, for the listening port
pub const PORT_ENV_VARS: [&str; 2] = ["SERVER_PORT", "WEBSITE_PORT"];

impl Config {
    /// Load configuration the way the binary does: file named by
    /// `FRONTDOOR_CONFIG` (or `frontdoor.toml`), environment, port override.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("FRONTDOOR_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut cfg = Self::load_from(&path)?;

        let overrides = PORT_ENV_VARS.map(|name| std::env::var(name).ok());
        cfg.server.port = resolve_port(&overrides, cfg.server.port);
        Ok(cfg)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FRONTDOOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from an in-memory TOML document over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }

    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.performance.connection_timeout)
    }

    pub const fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.performance.handler_timeout)
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("server.backlog", 1024)?
        .set_default("paths.public_dir", "public")?
        .set_default("paths.uploads_dir", "uploads")?
        .set_default("logging.level", "info")?
        .set_default("performance.keep_alive", true)?
        .set_default("performance.connection_timeout", 75)?
        .set_default("performance.handler_timeout", 30)
}

/// Pick the listening port: the first override that parses as a port wins,
/// otherwise the configured value.
pub fn resolve_port(overrides: &[Option<String>], configured: u16) -> u16 {
    for (name, value) in PORT_ENV_VARS.iter().zip(overrides) {
        let Some(raw) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        match raw.parse::<u16>() {
            Ok(port) => return port,
            Err(e) => logger::log_warning(&format!("Ignoring {name}='{raw}': {e}")),
        }
    }
    configured
}
