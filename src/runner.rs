//! Run lifecycle: session checks, per-shop scraping and incremental export

use crate::browser::{selectors, BrowserError, BrowserManager, Page};
use crate::config::{Config, ConfigError, Timings};
use crate::exporter::save_data;
use crate::filter::filter_records;
use crate::logging::{init_run_log, parse_level, LoggingError};
use crate::models::{AggregatedOutput, ShopResult};
use crate::navigation::{NavState, Navigator, ScrapeError};
use crate::pagination::collect_pages;
use crate::retry::click_with_retry;
use crate::shops::{load_shop_list, ShopListError};
use chrono::{DateTime, TimeZone};
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};

/// Run-level failures; they stop the whole run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    ShopList(#[from] ShopListError),

    #[error("Detected login page. Please login manually and re-run the scraper.")]
    LoginRequired,

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// Where one run writes its log and workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub day_dir: PathBuf,
    pub log_file: PathBuf,
    pub workbook: PathBuf,
}

impl RunPaths {
    pub fn new<Tz: TimeZone>(output_dir: &Path, started: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let day_dir = output_dir.join(format!("shop_creators_{}", started.format("%Y%m%d")));
        Self {
            log_file: day_dir.join("shop_creators.log"),
            workbook: day_dir.join(format!("all_shops_data_{}.xlsx", started.format("%Y%m%d_%H%M%S"))),
            day_dir,
        }
    }
}

/// Create the day directory and install the run log there.
///
/// The returned handle keeps the logger alive and must be held for the run.
pub fn prepare_output<Tz: TimeZone>(
    config: &Config,
    started: &DateTime<Tz>,
) -> Result<(RunPaths, log4rs::Handle), RunError>
where
    Tz::Offset: std::fmt::Display,
{
    let paths = RunPaths::new(&config.output_dir, started);
    fs::create_dir_all(&paths.day_dir).map_err(|source| RunError::OutputDir {
        path: paths.day_dir.clone(),
        source,
    })?;

    let handle = init_run_log(&paths.log_file, parse_level(&config.log_level))?;
    Ok((paths, handle))
}

/// Per-run tallies, logged when the run ends
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub shops_processed: usize,
    pub shops_with_data: usize,
    pub shops_not_found: usize,
    pub shops_failed: usize,
    pub rows_exported: usize,
}

impl RunSummary {
    pub fn log(&self) {
        log::info!(
            "Run finished: {} shops processed, {} with data, {} not found, {} failed, {} rows exported",
            self.shops_processed,
            self.shops_with_data,
            self.shops_not_found,
            self.shops_failed,
            self.rows_exported
        );
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub output: AggregatedOutput,
    pub summary: RunSummary,
}

/// Accumulates shop results and re-exports after every shop that adds rows
pub struct Aggregator {
    output: AggregatedOutput,
    workbook: PathBuf,
    summary: RunSummary,
}

impl Aggregator {
    pub fn new(workbook: PathBuf) -> Self {
        Self {
            output: AggregatedOutput::new(),
            workbook,
            summary: RunSummary::default(),
        }
    }

    /// Fold one shop's outcome into the run
    pub fn record(&mut self, shop: &str, outcome: Result<ShopResult, ScrapeError>) {
        self.summary.shops_processed += 1;

        match outcome {
            Ok(ShopResult::NotFound) => {
                self.summary.shops_not_found += 1;
                log::info!("No matching creators or filtered-out rows for: {}", shop);
            }
            Ok(result) => {
                if self.output.absorb(result) {
                    self.summary.shops_with_data += 1;
                    save_data(&self.output, &self.workbook);
                    log::info!("Scraped and appended data for: {}", shop);
                } else {
                    log::info!("No matching creators or filtered-out rows for: {}", shop);
                }
            }
            Err(e) => {
                self.summary.shops_failed += 1;
                log::error!("Error scraping {}: {}", shop, e);
            }
        }
    }

    /// Close the run; an empty run still leaves a placeholder workbook
    pub fn finish(mut self) -> RunReport {
        if self.output.is_empty() {
            save_data(&self.output, &self.workbook);
        }
        self.summary.rows_exported = self.output.len();
        RunReport {
            output: self.output,
            summary: self.summary,
        }
    }
}

/// Navigate, paginate and filter one shop
pub fn scrape_shop<P: Page>(page: &P, shop: &str, config: &Config) -> Result<ShopResult, ScrapeError> {
    log::info!("Starting scrape for shop: {}", shop);

    let navigator = Navigator::new(page, &config.timings);
    let Some(detail) = navigator.open_creator_table(shop)? else {
        return Ok(ShopResult::NotFound);
    };

    log::debug!("Navigation: {}", NavState::Paginating);
    let records = collect_pages(&detail, shop, config.max_pages, &config.timings);
    if let Err(e) = detail.close() {
        log::warn!("Could not close shop detail page: {}", e);
    }
    log::debug!("Navigation: {}", NavState::Done);

    Ok(ShopResult::Found(filter_records(records)))
}

/// Scrape every shop in order on the shared primary page
pub fn scrape_all<P: Page>(page: &P, shops: &[String], config: &Config, workbook: &Path) -> RunReport {
    let mut aggregator = Aggregator::new(workbook.to_path_buf());

    for shop in shops {
        let outcome = scrape_shop(page, shop, config);
        aggregator.record(shop, outcome);

        // polite delay between shops
        std::thread::sleep(config.timings.between_shops());
    }

    aggregator.finish()
}

/// Whether the rendered page text shows a login prompt
pub fn is_login_page(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(body) = Selector::parse("body") else {
        return false;
    };

    let text: String = document
        .select(&body)
        .flat_map(|body| body.descendants())
        .filter(|node| {
            let in_code = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name()))
                .is_some_and(|name| matches!(name, "script" | "style" | "noscript"));
            !in_code
        })
        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
        .collect();

    selectors::LOGIN_MARKERS.iter().any(|marker| text.contains(marker))
}

fn switch_region<P: Page>(page: &P, timings: &Timings) {
    let switched = click_with_retry(
        page,
        &selectors::REGION_SWITCH,
        timings.click_retry_attempts,
        timings.click_retry_delay(),
    );
    if switched {
        std::thread::sleep(timings.region_switch_settle());
    } else {
        log::debug!("Region switch element not available or clickable.");
    }
}

/// Open the dashboard on `page`, check the session, then scrape all shops
pub fn run_session<P: Page>(
    page: &P,
    shops: &[String],
    config: &Config,
    workbook: &Path,
) -> Result<RunReport, RunError> {
    log::info!("Opening {} ...", config.url);
    page.goto(&config.url, config.timings.page_load_timeout())?;

    log::info!(
        "If login is required, please complete it within {} seconds...",
        config.timings.login_grace().as_secs()
    );
    std::thread::sleep(config.timings.login_grace());

    if is_login_page(&page.content()?) {
        return Err(RunError::LoginRequired);
    }

    switch_region(page, &config.timings);

    Ok(scrape_all(page, shops, config, workbook))
}

/// Full run: read the shop list, launch the browser, scrape, export.
///
/// The browser is released when this returns, on every path.
pub fn run(config: &Config, paths: &RunPaths) -> Result<RunReport, RunError> {
    let shops = load_shop_list(&config.shops_file)?;
    log::info!("Loaded {} shops from {}", shops.len(), config.shops_file.display());

    log::info!("Launching browser scraper...");
    let manager = BrowserManager::new(config.browser.clone())?;
    let page = manager.new_page()?;

    run_session(&page, &shops, config, &paths.workbook)
}
