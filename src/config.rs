use crate::browser::BrowserConfig;
use crate::pagination::MAX_PAGES;
use crate::retry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Dashboard home page
    pub url: String,

    /// Shop names to scrape, one per line
    pub shops_file: PathBuf,

    /// Root directory for per-day log and workbook output
    pub output_dir: PathBuf,

    /// Upper bound on creator table pages read per shop
    pub max_pages: usize,

    /// Minimum level written to the run log ("error" .. "trace")
    pub log_level: String,

    pub browser: BrowserConfig,

    pub timings: Timings,
}

/// Fixed waits and timeouts of the scrape workflow, in milliseconds
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Timings {
    /// Initial dashboard load
    pub page_load_timeout_ms: u64,

    /// Window for the operator to complete an interactive login
    pub login_grace_ms: u64,

    /// Result rows and creator table waits
    pub element_wait_timeout_ms: u64,

    /// Detail tab spawn and load
    pub new_page_timeout_ms: u64,

    pub click_retry_attempts: usize,

    pub click_retry_delay_ms: u64,

    pub region_switch_settle_ms: u64,

    pub shop_tab_settle_ms: u64,

    pub filter_tab_settle_ms: u64,

    pub search_settle_ms: u64,

    /// Sidebar switch animation on the detail page
    pub creator_tab_settle_ms: u64,

    /// Re-render after clicking "next page"
    pub page_turn_ms: u64,

    /// Polite delay between shops
    pub between_shops_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            page_load_timeout_ms: 60_000,
            login_grace_ms: 30_000,
            element_wait_timeout_ms: 10_000,
            new_page_timeout_ms: 30_000,
            click_retry_attempts: retry::DEFAULT_ATTEMPTS,
            click_retry_delay_ms: retry::DEFAULT_DELAY.as_millis() as u64,
            region_switch_settle_ms: 1_000,
            shop_tab_settle_ms: 1_000,
            filter_tab_settle_ms: 1_000,
            search_settle_ms: 2_000,
            creator_tab_settle_ms: 5_000,
            page_turn_ms: 800,
            between_shops_ms: 2_000,
        }
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

impl Timings {
    pub fn page_load_timeout(&self) -> Duration {
        ms(self.page_load_timeout_ms)
    }

    pub fn login_grace(&self) -> Duration {
        ms(self.login_grace_ms)
    }

    pub fn element_wait_timeout(&self) -> Duration {
        ms(self.element_wait_timeout_ms)
    }

    pub fn new_page_timeout(&self) -> Duration {
        ms(self.new_page_timeout_ms)
    }

    pub fn click_retry_delay(&self) -> Duration {
        ms(self.click_retry_delay_ms)
    }

    pub fn region_switch_settle(&self) -> Duration {
        ms(self.region_switch_settle_ms)
    }

    pub fn shop_tab_settle(&self) -> Duration {
        ms(self.shop_tab_settle_ms)
    }

    pub fn filter_tab_settle(&self) -> Duration {
        ms(self.filter_tab_settle_ms)
    }

    pub fn search_settle(&self) -> Duration {
        ms(self.search_settle_ms)
    }

    pub fn creator_tab_settle(&self) -> Duration {
        ms(self.creator_tab_settle_ms)
    }

    pub fn page_turn(&self) -> Duration {
        ms(self.page_turn_ms)
    }

    pub fn between_shops(&self) -> Duration {
        ms(self.between_shops_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "https://kalodata.com".to_string(),
            shops_file: PathBuf::from("shops.txt"),
            output_dir: PathBuf::from("output"),
            max_pages: MAX_PAGES,
            log_level: "info".to_string(),
            browser: BrowserConfig::default(),
            timings: Timings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load `config.toml` from the working directory, or defaults when it is absent
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
