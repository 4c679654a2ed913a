//! Browser automation layer
//!
//! The scrape workflow only talks to the [`Page`] and [`PageElement`] traits.
//! [`ChromePage`] implements them over a headless Chrome tab, and
//! [`BrowserManager`] owns the browser process for the duration of a run.
//!
//! # Example
//!
//! ```no_run
//! use shop_creators_scraper::browser::{BrowserConfig, BrowserManager, Page};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let page = manager.new_page()?;
//!
//! page.goto("https://example.com", Duration::from_secs(60))?;
//! page.wait_for("h1", Duration::from_secs(10))?;
//! println!("Rendered {} bytes", page.content()?.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod page;
pub mod scraper;
pub mod selectors;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use page::{Locator, Page, PageElement};
pub use scraper::{ChromeElement, ChromePage};
