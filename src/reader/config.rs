use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the web reader content API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Endpoint the encoded article URL is appended to
    pub base_url: String,

    /// Query parameter carrying the API key (default: apiKey)
    pub key_param: String,

    /// Article query parameter collapsed to its first value (default: chksm)
    pub tracking_param: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Phrases that start trailing boilerplate, checked in order
    pub boilerplate_markers: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unifuncs.com/api/web-reader/".to_string(),
            key_param: "apiKey".to_string(),
            tracking_param: "chksm".to_string(),
            timeout_secs: 30,
            boilerplate_markers: vec![
                "**推荐阅读**".to_string(),
                "推荐阅读".to_string(),
                "诊疗经验谈".to_string(),
                "继续滑动看下一个".to_string(),
                "轻触阅读原文".to_string(),
            ],
        }
    }
}

impl ReaderConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ReaderConfig::default();
        assert_eq!(config.base_url, "https://api.unifuncs.com/api/web-reader/");
        assert_eq!(config.key_param, "apiKey");
        assert_eq!(config.tracking_param, "chksm");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        // The bold form has to be tried before the bare phrase
        assert_eq!(config.boilerplate_markers[0], "**推荐阅读**");
        assert_eq!(config.boilerplate_markers[1], "推荐阅读");
    }
}
