//! # upnpdig Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for upnpdig, handling loading,
//! merging, validation, and access to configuration data. It combines defaults,
//! user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the command handlers, not here)
//! 2. Project-specific `.upnpdig.toml` in the current directory or ancestors
//! 3. User file: `$UPNPDIG_CONFIG` if set, otherwise `~/.config/upnpdig/config.toml`
//! 4. Default values defined in the code
//!
//! Files are parsed into `FileConfig` (every field optional) so that a project file
//! only overrides what it actually sets. The merged result is resolved against the
//! defaults into a `Config` and validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [describe]
//! device_url = "http://192.168.1.20:1400/xml/device_description.xml"
//!
//! [discover]
//! timeout_secs = 5
//! search_target = "upnp:rootdevice"
//!
//! [http]
//! timeout_secs = 10
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let client = DescriptionClient::new(&cfg.http)?;
//! ```
//!
use crate::core::error::{Result, UpnpdigError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};
use url::Url;

/// Name of the project-level configuration file.
const PROJECT_CONFIG_FILENAME: &str = ".upnpdig.toml";
/// Environment variable naming an explicit user configuration file.
pub const CONFIG_ENV_VAR: &str = "UPNPDIG_CONFIG";

/// The effective configuration after merging every source with the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub describe: DescribeConfig,
    pub discover: DiscoverConfig,
    pub http: HttpConfig,
}

/// Settings for `upnpdig describe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeConfig {
    /// Device description URL used when `--device` is not given.
    pub device_url: String,
}

/// Settings for `upnpdig discover`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverConfig {
    /// How long to collect M-SEARCH responses.
    pub timeout_secs: u64,
    /// SSDP search target (`ST` header).
    pub search_target: String,
}

/// Settings for fetching description documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl DiscoverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_device_url() -> String {
    "http://localhost:1400/device_description.xml".to_string()
}
fn default_discover_timeout() -> u64 {
    3
}
fn default_search_target() -> String {
    "ssdp:all".to_string()
}
fn default_http_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    format!("upnpdig/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        FileConfig::default().resolve()
    }
}

/// On-disk shape of a configuration file. Every field is optional so files can be layered.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    describe: FileDescribe,
    #[serde(default)]
    discover: FileDiscover,
    #[serde(default)]
    http: FileHttp,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileDescribe {
    device_url: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileDiscover {
    timeout_secs: Option<u64>,
    search_target: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileHttp {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl FileConfig {
    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    fn merge(self, overrides: FileConfig) -> FileConfig {
        FileConfig {
            describe: FileDescribe {
                device_url: overrides.describe.device_url.or(self.describe.device_url),
            },
            discover: FileDiscover {
                timeout_secs: overrides.discover.timeout_secs.or(self.discover.timeout_secs),
                search_target: overrides.discover.search_target.or(self.discover.search_target),
            },
            http: FileHttp {
                timeout_secs: overrides.http.timeout_secs.or(self.http.timeout_secs),
                user_agent: overrides.http.user_agent.or(self.http.user_agent),
            },
        }
    }

    fn resolve(self) -> Config {
        Config {
            describe: DescribeConfig {
                device_url: self.describe.device_url.unwrap_or_else(default_device_url),
            },
            discover: DiscoverConfig {
                timeout_secs: self.discover.timeout_secs.unwrap_or_else(default_discover_timeout),
                search_target: self.discover.search_target.unwrap_or_else(default_search_target),
            },
            http: HttpConfig {
                timeout_secs: self.http.timeout_secs.unwrap_or_else(default_http_timeout),
                user_agent: self.http.user_agent.unwrap_or_else(default_user_agent),
            },
        }
    }
}

/// Loads, merges and validates the configuration for this invocation.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged = user_config
        .unwrap_or_default()
        .merge(project_config.unwrap_or_default())
        .resolve();
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<FileConfig>> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(explicit);
        if path.is_file() {
            info!("Loading configuration from ${}: {}", CONFIG_ENV_VAR, path.display());
            return load_config_from_path(&path).map(Some);
        }
        debug!(
            "${} points to {}, which is not a file; using defaults",
            CONFIG_ENV_VAR,
            path.display()
        );
        return Ok(None);
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "upnpdig") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!("User configuration file not found at {}", config_path.display());
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<FileConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", project_config_path.display());
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root looking for `.upnpdig.toml`.
/// Stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!("Found .git directory at {}, stopping project config search.", path.display());
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn validate_config(config: &Config) -> Result<()> {
    match Url::parse(&config.describe.device_url) {
        Ok(url) if url.has_host() => {}
        Ok(_) => {
            return Err(anyhow!(UpnpdigError::Config(format!(
                "describe.device_url '{}' has no host",
                config.describe.device_url
            ))))
        }
        Err(e) => {
            return Err(anyhow!(UpnpdigError::Config(format!(
                "describe.device_url '{}' is not a valid URL: {}",
                config.describe.device_url, e
            ))))
        }
    }
    if config.discover.timeout_secs == 0 {
        return Err(anyhow!(UpnpdigError::Config(
            "discover.timeout_secs must be greater than 0".to_string()
        )));
    }
    if config.discover.search_target.trim().is_empty() {
        return Err(anyhow!(UpnpdigError::Config(
            "discover.search_target must not be empty".to_string()
        )));
    }
    if config.http.timeout_secs == 0 {
        return Err(anyhow!(UpnpdigError::Config(
            "http.timeout_secs must be greater than 0".to_string()
        )));
    }
    Ok(())
}
