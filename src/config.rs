// Configuration layer
// Layered loading: optional scriptguard.toml, SCRIPTGUARD_* environment
// variables, then built-in defaults matching the original demo setup.

use serde::Deserialize;
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub static_files: StaticConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
}

/// Performance configuration (all timeouts in seconds)
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// Static demo file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    pub root: String,
    pub index_files: Vec<String>,
}

impl Config {
    /// Load configuration from the default file ("scriptguard.toml")
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("scriptguard")
    }

    /// Load configuration from the specified file path (without extension).
    /// The file is optional; defaults cover the full demo setup.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SCRIPTGUARD"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("static_files.root", "demo")?
            .set_default("static_files.index_files", vec!["index.html".to_string()])?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the listening address. Port 0 requests an ephemeral port.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
