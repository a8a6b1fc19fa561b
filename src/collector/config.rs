use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Chrome session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Window and viewport width (default: 1920)
    pub window_width: u32,

    /// Window and viewport height (default: 1080)
    pub window_height: u32,

    /// Chrome executable; chromiumoxide searches the usual locations when unset
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
        }
    }
}

/// Timing and stopping rules for the scroll loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Wait after navigation before the first scroll, in milliseconds (default: 5000)
    pub initial_load_delay_ms: u64,

    /// Wait after each scroll for lazy content, in milliseconds (default: 3000)
    pub settle_delay_ms: u64,

    /// Upper bound on waiting for entries to appear, in seconds (default: 10)
    pub wait_timeout_secs: u64,

    /// Consecutive scrolls without new entries before stopping (default: 3)
    pub max_stalls: u32,

    /// Scroll count after which the loop stops regardless (default: 100)
    pub max_scrolls: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            initial_load_delay_ms: 5000,
            settle_delay_ms: 3000,
            wait_timeout_secs: 10,
            max_stalls: 3,
            max_scrolls: 100,
        }
    }
}

impl ScrollConfig {
    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}
