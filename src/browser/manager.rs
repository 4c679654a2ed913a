use super::config::BrowserConfig;
use super::scraper::ChromePage;
use headless_chrome::{Browser, LaunchOptions};
use std::sync::Arc;

/// Owns the browser process for one run.
///
/// Dropping the manager shuts the browser down, whichever path the run took.
pub struct BrowserManager {
    browser: Arc<Browser>,
}

impl BrowserManager {
    /// Launch a browser with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let launch_options = Self::build_launch_options(&config)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        log::debug!("Browser launched (headless: {})", config.headless);

        Ok(Self {
            browser: Arc::new(browser),
        })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options(config: &BrowserConfig) -> Result<LaunchOptions<'static>, BrowserError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .user_data_dir(config.user_data_dir.clone())
            .idle_browser_timeout(config.idle_timeout())
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Open the primary page of the run
    pub fn new_page(&self) -> Result<ChromePage, BrowserError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;
        Ok(ChromePage::new(Arc::clone(&self.browser), tab))
    }
}

impl Drop for BrowserManager {
    fn drop(&mut self) {
        log::info!("Browser closed.");
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Interaction failed: {0}")]
    InteractionError(String),

    #[error("No new page opened: {0}")]
    NoNewPage(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),
}
