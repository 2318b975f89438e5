//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::response_cache::{DEFAULT_CACHE_ENTRIES, DEFAULT_MAX_CACHE_SIZE};

const APP_NAME: &str = "async-image";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Returns the platform directories for this application.
#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where fetched responses are kept for the response-cache fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Persist responses on disk.
    #[default]
    Disk,
    /// Keep responses in an in-process LRU.
    Memory,
    /// Do not keep responses.
    Off,
}

impl std::fmt::Display for CacheMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disk => write!(f, "disk"),
            Self::Memory => write!(f, "memory"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// HTTP client configuration.
    #[serde(default)]
    pub http: HttpConfig,

    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset means the client's defaults apply.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache backend.
    #[serde(default)]
    pub mode: CacheMode,

    /// Directory for the disk backend. Defaults to the platform cache dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Size limit of the disk backend in bytes.
    #[serde(default = "default_max_disk_bytes")]
    pub max_disk_bytes: u64,

    /// Entry limit of the memory backend.
    #[serde(default = "default_memory_entries")]
    pub memory_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: CacheMode::default(),
            dir: None,
            max_disk_bytes: default_max_disk_bytes(),
            memory_entries: default_memory_entries(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Text shown in place of an image that is not available yet.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Seconds to wait for loads before printing the final frame.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            wait_secs: default_wait_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_max_disk_bytes() -> u64 {
    DEFAULT_MAX_CACHE_SIZE
}

const fn default_memory_entries() -> usize {
    DEFAULT_CACHE_ENTRIES
}

fn default_placeholder() -> String {
    "[ placeholder ]".to_string()
}

const fn default_wait_secs() -> u64 {
    30
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(timeout) = args.timeout_secs {
            self.http.timeout_secs = Some(timeout);
        }
        if let Some(mode) = args.cache {
            self.cache.mode = mode;
        }
        if let Some(dir) = &args.cache_dir {
            self.cache.dir = Some(dir.clone());
        }
        if let Some(placeholder) = &args.placeholder {
            self.display.placeholder.clone_from(placeholder);
        }
        if let Some(wait) = args.wait_secs {
            self.display.wait_secs = wait;
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
