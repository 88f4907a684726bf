//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `FAME_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::DateLocale;
use crate::gateway::Endpoints;
use crate::models::CategoryId;
use crate::views::{AdminOptions, DeletePolicy};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Where the admin token is kept between runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_token_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("fame-gallery").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./fame_gallery_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

/// Admin page behavior
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Ask before deleting an entry
    #[serde(default = "default_delete_confirmation")]
    pub delete_confirmation: bool,

    /// Category preselected in the creation form
    #[serde(default)]
    pub default_category_id: Option<CategoryId>,
}

fn default_delete_confirmation() -> bool {
    true
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            delete_confirmation: default_delete_confirmation(),
            default_category_id: None,
        }
    }
}

impl AdminConfig {
    pub fn options(&self) -> AdminOptions {
        AdminOptions {
            delete_policy: if self.delete_confirmation {
                DeletePolicy::Confirm
            } else {
                DeletePolicy::Immediate
            },
            default_category: self.default_category_id,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub date_locale: DateLocale,
}

/// Static host configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built browser app (`trunk build` output)
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_dist_dir() -> String {
    "./gallery-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dist_dir: default_dist_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("fame-gallery").join("config.toml")),
            Some(PathBuf::from("/etc/fame-gallery/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Endpoint overrides
        if let Some(url) = var("FAME_ITEMS_URL") {
            self.endpoints.items_url = url;
        }
        if let Some(url) = var("FAME_AUTH_URL") {
            self.endpoints.auth_url = url;
        }
        if let Some(url) = var("FAME_IMAGES_URL") {
            self.endpoints.images_url = url;
        }
        if let Some(url) = var("FAME_UPLOAD_URL") {
            self.endpoints.upload_url = url;
        }

        // Session overrides
        if let Some(path) = var("FAME_SESSION_FILE") {
            self.session.token_file = path;
        }

        // Server overrides
        if let Some(host) = var("FAME_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("FAME_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid FAME_PORT: {}", port),
            }
        }
        if let Some(dir) = var("FAME_DIST_DIR") {
            self.server.dist_dir = dir;
        }

        // Logging overrides
        if let Some(level) = var("FAME_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FAME_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn token_file(&self) -> PathBuf {
        PathBuf::from(&self.session.token_file)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    let endpoints = Endpoints::default();
    format!(
        r#"# Fame Gallery Configuration
#
# Environment variables override these settings:
# - FAME_ITEMS_URL, FAME_AUTH_URL, FAME_IMAGES_URL, FAME_UPLOAD_URL
# - FAME_SESSION_FILE
# - FAME_HOST, FAME_PORT, FAME_DIST_DIR
# - FAME_LOG_LEVEL, FAME_LOG_FORMAT

[endpoints]
# Items (list/create/delete) and categories (?type=categories)
items_url = "{items}"

# Login
auth_url = "{auth}"

# Uploaded images listing
images_url = "{images}"

# Image upload (multipart, field "image")
upload_url = "{upload}"

[client]
# Request timeout in seconds
request_timeout_secs = 30

[session]
# File holding the admin token between runs
token_file = "~/.local/share/fame-gallery/session.json"

[admin]
# Ask before deleting an entry
delete_confirmation = true

# Category preselected in the creation form (first category when unset)
# default_category_id = 1

[display]
# Long-form date language: en or ru
date_locale = "en"

[server]
# Static host for the built browser app
host = "0.0.0.0"
port = 8080
dist_dir = "./gallery-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        items = endpoints.items_url,
        auth = endpoints.auth_url,
        images = endpoints.images_url,
        upload = endpoints.upload_url,
    )
}
