use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the browser instance driving a run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode. Off by default so the operator can log in.
    pub headless: bool,

    /// Browser window width
    pub window_width: u32,

    /// Browser window height
    pub window_height: u32,

    /// Chrome profile directory; reuse one to keep an authenticated session
    pub user_data_dir: Option<PathBuf>,

    /// Seconds without browser events before the connection is dropped
    pub idle_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            window_width: 1920,
            window_height: 1080,
            user_data_dir: None,
            idle_timeout_secs: 600,
        }
    }
}

impl BrowserConfig {
    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
