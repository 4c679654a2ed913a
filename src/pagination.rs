use crate::browser::{selectors, BrowserError, Page, PageElement};
use crate::config::Timings;
use crate::helpers::first_line;
use crate::models::{CreatorRecord, Revenue};

/// Columns a creator row must have to be extracted
pub const MIN_COLUMNS: usize = 6;

pub const MAX_PAGES: usize = 50;

enum PageOutcome {
    /// "Next" was clicked; another page follows
    Advanced,
    /// No enabled "next" control
    Last,
}

/// Read the creator table page by page, at most `max_pages` pages.
///
/// Any failure ends pagination but keeps every row already read, including
/// rows of the page that failed.
pub fn collect_pages<P: Page>(
    page: &P,
    shop_name: &str,
    max_pages: usize,
    timings: &Timings,
) -> Vec<CreatorRecord> {
    let mut records = Vec::new();
    let mut page_num = 1;

    while page_num <= max_pages {
        if page.is_closed() {
            log::warn!("Shop page closed while scraping at page {}", page_num);
            break;
        }

        match collect_page(page, shop_name, page_num, timings, &mut records) {
            Ok(PageOutcome::Advanced) => {
                page_num += 1;
                std::thread::sleep(timings.page_turn());
            }
            Ok(PageOutcome::Last) => break,
            Err(e) => {
                log::warn!("Error on page {}: {}", page_num, e);
                break;
            }
        }
    }

    log::info!("Collected {} rows for shop: {}", records.len(), shop_name);
    records
}

fn collect_page<P: Page>(
    page: &P,
    shop_name: &str,
    page_num: usize,
    timings: &Timings,
    records: &mut Vec<CreatorRecord>,
) -> Result<PageOutcome, BrowserError> {
    page.wait_for(selectors::CREATOR_TABLE, timings.element_wait_timeout())?;

    let rows = page.query_all(selectors::TABLE_BODY_ROW)?;
    log::info!("Page {} contains {} rows.", page_num, rows.len());

    for row in &rows {
        match extract_row(row, shop_name) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => log::debug!("Skipping row with fewer than {} columns", MIN_COLUMNS),
            Err(e) => log::warn!("Error parsing table row: {}", e),
        }
    }

    match page.query(selectors::NEXT_PAGE)? {
        Some(next) => {
            next.click()?;
            Ok(PageOutcome::Advanced)
        }
        None => Ok(PageOutcome::Last),
    }
}

/// Build a record from one table row; `None` when the row is too short
pub fn extract_row<E: PageElement>(row: &E, shop_name: &str) -> Result<Option<CreatorRecord>, BrowserError> {
    let cells = row.query_all(selectors::TABLE_CELL)?;
    if cells.len() < MIN_COLUMNS {
        return Ok(None);
    }

    let text = |i: usize| -> Result<String, BrowserError> {
        Ok(cells[i].inner_text()?.trim().to_string())
    };

    Ok(Some(CreatorRecord {
        name: text(0)?,
        creator: first_line(&cells[1].inner_text()?).to_string(),
        account_type: text(2)?,
        revenue: Revenue::Raw(text(3)?),
        product: text(4)?,
        live: text(5)?,
        shop_name: shop_name.to_string(),
    }))
}
