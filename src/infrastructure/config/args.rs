//! Command-line arguments.

use super::app_config::{CacheMode, LogLevel};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments, merged over the configuration file.
#[derive(Debug, Parser)]
#[command(
    name = "async-image",
    version,
    about = "Fetch remote images once and serve them from a shared per-URL cache",
    long_about = None
)]
pub struct CliArgs {
    /// Image URLs to display.
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Response cache backend.
    #[arg(long, value_enum)]
    pub cache: Option<CacheMode>,

    /// Directory for the disk response cache.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Text shown while an image is unavailable.
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Seconds to wait for loads before printing the final frame.
    #[arg(long, value_name = "SECS")]
    pub wait_secs: Option<u64>,
}
