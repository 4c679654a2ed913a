//! Navigation from the dashboard home to a shop's creator table
//!
//! The path is fixed: Shop tab, optional filter tab, search, match the
//! result row, open the detail tab, switch to the Creator sidebar entry.
//! Every step before the result-row wait is best effort; the wait itself,
//! the row match and the detail tab are the hard gates.

use crate::browser::{selectors, BrowserError, Page, PageElement};
use crate::config::Timings;
use crate::helpers::same_shop_name;
use crate::retry::click_with_retry;
use std::fmt;

/// Steps of the per-shop navigation, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Start,
    ShopTabOpen,
    FilterApplied,
    SearchSubmitted,
    ResultsListed,
    RowMatched,
    DetailPageOpen,
    CreatorTabOpen,
    Paginating,
    Done,
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavState::Start => "start",
            NavState::ShopTabOpen => "shop tab open",
            NavState::FilterApplied => "filter applied",
            NavState::SearchSubmitted => "search submitted",
            NavState::ResultsListed => "results listed",
            NavState::RowMatched => "row matched",
            NavState::DetailPageOpen => "detail page open",
            NavState::CreatorTabOpen => "creator tab open",
            NavState::Paginating => "paginating",
            NavState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Shop-level failures; they end the current shop only
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to open shop detail page: {0}")]
    DetailPage(#[source] BrowserError),

    #[error("Failed to switch to Creator tab: {0}")]
    CreatorTab(#[source] BrowserError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// Drives the primary page for one shop at a time
pub struct Navigator<'a, P: Page> {
    page: &'a P,
    timings: &'a Timings,
}

impl<'a, P: Page> Navigator<'a, P> {
    pub fn new(page: &'a P, timings: &'a Timings) -> Self {
        Self { page, timings }
    }

    /// Walk from the dashboard to `shop_name`'s creator table.
    ///
    /// Returns the detail page positioned on the Creator view, or `None` when
    /// the shop does not appear in the search results. The caller closes the
    /// returned page once the table has been read.
    pub fn open_creator_table(&self, shop_name: &str) -> Result<Option<P>, ScrapeError> {
        self.open_shop_tab();
        self.apply_filter_tab();
        self.submit_search(shop_name);

        if !self.wait_for_results(shop_name) {
            return Ok(None);
        }

        let Some(row) = self.find_shop_row(shop_name)? else {
            log::error!("Shop not found in search results: {}", shop_name);
            return Ok(None);
        };

        let detail = self.open_detail_page(&row)?;
        if let Err(e) = self.open_creator_tab(&detail) {
            if let Err(close_err) = detail.close() {
                log::debug!("Could not close shop detail page: {}", close_err);
            }
            return Err(e);
        }
        Ok(Some(detail))
    }

    fn enter(&self, state: NavState) {
        log::debug!("Navigation: {}", state);
    }

    fn open_shop_tab(&self) {
        self.enter(NavState::Start);
        let clicked = click_with_retry(
            self.page,
            &selectors::SHOP_TAB,
            self.timings.click_retry_attempts,
            self.timings.click_retry_delay(),
        );
        if !clicked {
            log::warn!("Could not open the Shop tab; continuing");
        }
        std::thread::sleep(self.timings.shop_tab_settle());
        self.enter(NavState::ShopTabOpen);
    }

    fn apply_filter_tab(&self) {
        match self.page.click(&selectors::FILTER_TAB) {
            Ok(()) => {
                std::thread::sleep(self.timings.filter_tab_settle());
                self.enter(NavState::FilterApplied);
            }
            Err(e) => log::debug!("Filter tab not found or not clickable: {}", e),
        }
    }

    fn submit_search(&self, shop_name: &str) {
        let submitted = self
            .page
            .fill(selectors::SEARCH_INPUT, shop_name)
            .and_then(|()| self.page.press(selectors::SEARCH_INPUT, "Enter"));

        match submitted {
            Ok(()) => {
                std::thread::sleep(self.timings.search_settle());
                log::info!("Searched for shop: {}", shop_name);
                self.enter(NavState::SearchSubmitted);
            }
            Err(e) => log::warn!("Could not input shop name: {}", e),
        }
    }

    fn wait_for_results(&self, shop_name: &str) -> bool {
        match self
            .page
            .wait_for(selectors::RESULT_ROW, self.timings.element_wait_timeout())
        {
            Ok(()) => {
                self.enter(NavState::ResultsListed);
                true
            }
            Err(e) => {
                log::error!("No shop list rows detected after searching for {}: {}", shop_name, e);
                false
            }
        }
    }

    /// First result row whose display name equals `shop_name`, ignoring case.
    /// Later rows with the same name are never considered.
    fn find_shop_row(&self, shop_name: &str) -> Result<Option<P::Element>, BrowserError> {
        for row in self.page.query_all(selectors::RESULT_ROW)? {
            let name = match row.query(selectors::RESULT_ROW_NAME) {
                Ok(Some(label)) => label.inner_text().unwrap_or_default(),
                _ => String::new(),
            };

            if same_shop_name(shop_name, &name) {
                log::info!("Found matching shop entry: {}", name.trim());
                self.enter(NavState::RowMatched);
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn open_detail_page(&self, row: &P::Element) -> Result<P, ScrapeError> {
        let detail = self
            .page
            .open_in_new_page(row, self.timings.new_page_timeout())
            .map_err(ScrapeError::DetailPage)?;
        log::info!("Opened shop detail page.");
        self.enter(NavState::DetailPageOpen);
        Ok(detail)
    }

    /// Click the first sidebar entry mentioning "Creator". Without one the
    /// view stays as is and the table wait decides.
    fn open_creator_tab(&self, detail: &P) -> Result<(), ScrapeError> {
        let links = detail
            .query_all(selectors::SIDEBAR_LINK)
            .map_err(ScrapeError::CreatorTab)?;

        let mut switched = false;
        for link in links {
            let text = link.inner_text().map_err(ScrapeError::CreatorTab)?;
            if text.contains(selectors::CREATOR_TAB_TEXT) {
                link.click().map_err(ScrapeError::CreatorTab)?;
                log::info!("Switched to Creator tab.");
                switched = true;
                break;
            }
        }

        if !switched {
            log::warn!("No Creator entry in the detail sidebar; staying on the current view");
        }

        std::thread::sleep(self.timings.creator_tab_settle());
        self.enter(NavState::CreatorTabOpen);
        Ok(())
    }
}
