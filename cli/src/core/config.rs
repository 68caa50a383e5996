//! # sessionkit Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges, and validates the small amount of configuration
//! sessionkit needs: the default request timeout, the user agent sent by the
//! transport, the base URL of the session server, and the default directory
//! for file enumeration.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. `SESSIONKIT_BASE_URL` environment variable (base URL only)
//! 2. Project-specific `.sessionkit.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! The library helpers never read configuration themselves; the caller loads it
//! once and passes the relevant values down (see `network::Client::from_config`).
//!
//! ## Examples
//!
//! ```toml
//! [transport]
//! default_timeout_secs = 2.5
//!
//! [server]
//! base_url = "http://localhost:5000"
//!
//! [files]
//! default_root = "~/worksheets"
//! ```
//!
use crate::common::network::MAX_TIMEOUT;
use crate::core::error::{Result, SessionError};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Environment variable overriding `server.base_url`.
pub const BASE_URL_ENV: &str = "SESSIONKIT_BASE_URL";

const PROJECT_CONFIG_FILENAME: &str = ".sessionkit.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

/// Settings applied to every GET/POST.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Timeout used when a call does not pass one explicitly.
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: f64,
    /// Value of the `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Location of the session server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Relative URLs (starting with `/`) given on the command line are joined onto this.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Defaults for the file enumeration helpers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Directory listed when `sessionkit files` is given no path (can use ~).
    #[serde(default = "default_files_root")]
    pub default_root: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            default_root: default_files_root(),
        }
    }
}

impl TransportConfig {
    /// The default timeout as a `Duration`.
    pub fn default_timeout(&self) -> Result<Duration> {
        let secs = self.default_timeout_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(SessionError::Config(format!(
                "transport.default_timeout_secs must be a positive number of seconds, got {}",
                secs
            )));
        }
        let timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
            SessionError::Config(format!(
                "transport.default_timeout_secs {} is out of range: {}",
                secs, e
            ))
        })?;
        if timeout > MAX_TIMEOUT {
            return Err(SessionError::Config(format!(
                "transport.default_timeout_secs must be at most {}, got {}",
                MAX_TIMEOUT.as_secs(),
                secs
            )));
        }
        Ok(timeout)
    }
}

impl ServerConfig {
    /// Joins `url` onto the base URL when it is server-relative (`/path`).
    /// Absolute URLs are returned unchanged.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }
}

fn default_timeout_secs() -> f64 {
    10.0
}
fn default_user_agent() -> String {
    format!("sessionkit/{}", env!("CARGO_PKG_VERSION"))
}
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_files_root() -> String {
    ".".to_string()
}

/// Loads the effective configuration from all sources, expands paths and validates it.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    apply_env_overrides(&mut merged_config, std::env::var(BASE_URL_ENV).ok());
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config)?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "SessionKit", "sessionkit") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().map_err(|e| SessionError::fs(".", e))?;
    Ok(find_project_config_from(&current_dir))
}

/// Walks from `start` towards the root looking for `.sessionkit.toml`.
/// Stops at the first directory containing `.git`.
fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and parses a single TOML configuration file.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| SessionError::fs(path, e))?;
    toml::from_str(&content).map_err(|e| {
        SessionError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        ))
    })
}

// A project value wins whenever it differs from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.transport.default_timeout_secs =
        if project_cfg.transport.default_timeout_secs != default_timeout_secs() {
            project_cfg.transport.default_timeout_secs
        } else {
            user.transport.default_timeout_secs
        };
    merged.transport.user_agent = if project_cfg.transport.user_agent != default_user_agent() {
        project_cfg.transport.user_agent
    } else {
        user.transport.user_agent
    };
    merged.server.base_url = if project_cfg.server.base_url != default_base_url() {
        project_cfg.server.base_url
    } else {
        user.server.base_url
    };
    merged.files.default_root = if project_cfg.files.default_root != default_files_root() {
        project_cfg.files.default_root
    } else {
        user.files.default_root
    };
    merged
}

fn apply_env_overrides(config: &mut Config, base_url: Option<String>) {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        debug!("Overriding server.base_url from {}: {}", BASE_URL_ENV, url);
        config.server.base_url = url;
    }
}

fn expand_config_paths(config: &mut Config) {
    config.files.default_root = shellexpand::tilde(&config.files.default_root).into_owned();
    debug!("Expanded files root: {}", config.files.default_root);
}

fn validate_config(config: &Config) -> Result<()> {
    config.transport.default_timeout()?;
    match reqwest::Url::parse(&config.server.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => {
            return Err(SessionError::Config(format!(
                "server.base_url must use http or https, got scheme '{}'",
                url.scheme()
            )))
        }
        Err(e) => {
            return Err(SessionError::Config(format!(
                "Invalid server.base_url '{}': {}",
                config.server.base_url, e
            )))
        }
    }
    Ok(())
}
