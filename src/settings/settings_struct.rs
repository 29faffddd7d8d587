use std::path::Path;
use std::sync::{Arc, RwLock};

use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(String),
}

fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    25500
}

fn default_max_concur_threads() -> usize {
    4
}

fn default_user_agent() -> String {
    "LaoWang-Sub-Converter/1.0".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_info_log_level() -> String {
    "info".to_string()
}

/// Where the HTTP adapter listens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// Worker threads of the HTTP server
    #[serde(default = "default_max_concur_threads")]
    pub max_concur_threads: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_concur_threads: default_max_concur_threads(),
        }
    }
}

/// Outbound subscription fetching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Proxy for fetching subscriptions: empty or `SYSTEM` uses the
    /// environment, `NONE` connects directly, anything else is a proxy URL
    #[serde(default)]
    pub proxy: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            proxy: String::new(),
        }
    }
}

/// Conversion flags applied when a request leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultOptions {
    #[serde(default = "default_true")]
    pub emoji: bool,
    #[serde(default = "default_true")]
    pub udp: bool,
    #[serde(default)]
    pub skip_cert_verify: bool,
    #[serde(default)]
    pub sort: bool,
    #[serde(default = "default_true")]
    pub dedupe: bool,
}

impl Default for DefaultOptions {
    fn default() -> Self {
        DefaultOptions {
            emoji: true,
            udp: true,
            skip_cert_verify: false,
            sort: false,
            dedupe: true,
        }
    }
}

/// Settings structure to hold global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub defaults: DefaultOptions,
    #[serde(default = "default_info_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings::default(),
            fetch: FetchSettings::default(),
            defaults: DefaultOptions::default(),
            log_level: default_info_log_level(),
        }
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current() -> Arc<Settings> {
        GLOBAL
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Parse settings text. A document whose top level is a YAML mapping is
    /// read as YAML, anything else as TOML.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        let is_yaml_mapping = serde_yaml::from_str::<serde_yaml::Value>(content)
            .map(|value| value.is_mapping())
            .unwrap_or(false);

        let mut settings: Settings = if is_yaml_mapping {
            serde_yaml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?
        } else {
            toml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?
        };

        if settings.server.listen_address.trim().is_empty() {
            settings.server.listen_address = default_listen_address();
        }
        Ok(settings)
    }

    /// Load settings from a local file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_content(&content)
    }
}

// Global settings instance
static GLOBAL: Lazy<RwLock<Arc<Settings>>> = Lazy::new(|| RwLock::new(Arc::new(Settings::new())));

fn replace_global(settings: Settings) {
    *GLOBAL
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(settings);
}

/// Load the settings file at `path` and make it current. An empty path
/// keeps the defaults.
pub fn init_settings(path: &str) -> Result<Arc<Settings>, SettingsError> {
    if path.is_empty() {
        info!("No settings file given, using defaults");
        return Ok(Settings::current());
    }

    let settings = Settings::load_from_file(path)?;
    info!("Loaded settings from {}", path);
    replace_global(settings);
    Ok(Settings::current())
}

/// Replace the current settings with ones parsed from `content`
pub fn update_settings_from_content(content: &str) -> Result<(), SettingsError> {
    let settings = Settings::load_from_content(content)?;
    replace_global(settings);
    Ok(())
}
