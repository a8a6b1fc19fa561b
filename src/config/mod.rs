//! Configuration management for albumdl.
//!
//! Tunables are read from `~/.config/albumdl/config.toml` at startup (or the
//! path given with `--config`). If the file doesn't exist, a default
//! configuration with comments is created. The web reader API key is a
//! secret and lives in a `.env` file instead, see [`secrets`].

pub mod album;
pub mod secrets;

pub use album::AlbumConfig;
pub use secrets::{ApiKey, API_KEY_VAR};

use crate::collector::{BrowserOptions, ScrollConfig};
use crate::reader::ReaderConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub album: AlbumConfig,
    pub browser: BrowserOptions,
    pub scroll: ScrollConfig,
    pub reader: ReaderConfig,
    pub logging: LoggingConfig,
}

/// Where the per-run log file goes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for `downloader_<timestamp>.log`, relative to the working directory
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/albumdl/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("albumdl").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# albumdl configuration
#
# The web reader API key is NOT read from this file. Put it in a .env file
# next to the albumdl executable:
#
#   WEB_READER_API_KEY=your-key

[album]
# Host the album page must be served from
domain = "mp.weixin.qq.com"

# Path fragment that identifies an album page
path_marker = "appmsgalbum"

# CSS selector of one article entry in the album list
item_selector = "li.album__list-item"

# Attributes carrying the article title and link on each entry
title_attr = "data-title"
link_attr = "data-link"

[browser]
# Run Chrome without a visible window
headless = true

# Window and viewport size
window_width = 1920
window_height = 1080

# Explicit Chrome/Chromium executable (auto-detected when unset)
# chrome_path = "/usr/bin/chromium"

[scroll]
# Wait after navigating to the album page (milliseconds)
initial_load_delay_ms = 5000

# Wait after each scroll for lazy-loaded entries (milliseconds)
settle_delay_ms = 3000

# Upper bound on waiting for entries to be present (seconds)
wait_timeout_secs = 10

# Stop after this many consecutive scrolls that found nothing new
max_stalls = 3

# Hard cap on the number of scrolls
max_scrolls = 100

[reader]
# Web reader endpoint; the encoded article URL is appended to it
base_url = "https://api.unifuncs.com/api/web-reader/"

# Query parameter carrying the API key
key_param = "apiKey"

# Query parameter of article URLs that is collapsed to its first value
tracking_param = "chksm"

# Request timeout in seconds
timeout_secs = 30

# Content is cut at the first occurrence of each marker, in this order
boilerplate_markers = [
    "**推荐阅读**",
    "推荐阅读",
    "诊疗经验谈",
    "继续滑动看下一个",
    "轻触阅读原文",
]

[logging]
# Log files are written here, relative to the working directory
dir = "logs"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to load env file at {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("{0} is not set; add it to the .env file next to the executable")]
    MissingApiKey(&'static str),
}
