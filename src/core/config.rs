//! Configuration management for the MCP server.
//!
//! Values come from defaults, overridden by environment variables (optionally
//! loaded from a `.env` file). The Google Ads credential bundle itself lives in
//! a separate YAML file, see [`super::credentials`].

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Default Google Ads REST endpoint.
pub const DEFAULT_ADS_ENDPOINT: &str = "https://googleads.googleapis.com";

/// Google Ads API version used when `MCP_GOOGLE_ADS_API_VERSION` is unset.
pub const DEFAULT_ADS_API_VERSION: &str = "v20";

/// Landing page for new ads when neither the caller nor
/// `MCP_DEFAULT_FINAL_URL` supplies one.
pub const DEFAULT_FINAL_URL: &str = "https://hogans.netlify.app/shop.html";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Google Ads platform configuration.
    pub ads: AdsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Where and how to reach the Google Ads API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdsConfig {
    /// REST endpoint, without version.
    pub endpoint: String,

    /// API version path segment, e.g. `v20`.
    pub api_version: String,

    /// Explicit credential file. When unset the usual locations are searched.
    pub credentials_path: Option<PathBuf>,

    /// Landing page used by `create_responsive_search_ad` when the caller
    /// omits `final_url`. `None` makes `final_url` mandatory.
    pub default_final_url: Option<String>,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ADS_ENDPOINT.to_string(),
            api_version: DEFAULT_ADS_API_VERSION.to_string(),
            credentials_path: None,
            default_final_url: Some(DEFAULT_FINAL_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "google-ads-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            ads: AdsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix; the credential file path is
    /// read from `GOOGLE_ADS_CREDENTIALS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(path) = std::env::var("GOOGLE_ADS_CREDENTIALS") {
            info!("Google Ads credentials path set to {}", path);
            config.ads.credentials_path = Some(PathBuf::from(path));
        }

        if let Ok(version) = std::env::var("MCP_GOOGLE_ADS_API_VERSION") {
            config.ads.api_version = version;
        }

        if let Ok(endpoint) = std::env::var("MCP_GOOGLE_ADS_ENDPOINT") {
            config.ads.endpoint = endpoint;
        }

        if let Ok(url) = std::env::var("MCP_DEFAULT_FINAL_URL") {
            if !url.trim().is_empty() {
                config.ads.default_final_url = Some(url.trim().to_string());
            }
        }

        config
    }
}
