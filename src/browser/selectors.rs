//! Fixed page selectors for the dashboard

use super::page::Locator;

/// "Shop" entry in the dashboard header navigation
pub const SHOP_TAB: Locator<'static> = Locator::with_text("#page_header_left *", "Shop");

/// Optional labeled tab on the shop list
pub const FILTER_TAB: Locator<'static> = Locator::with_text("div.ant-tabs-tab", "Filter");

/// Region selector shown after login
pub const REGION_SWITCH: Locator<'static> =
    Locator::css(r"div.h-\[22px\].hover\:bg-\[rgb\(238\,246\,253\)\]");

pub const SEARCH_INPUT: &str = "input[placeholder='Search shop name']";

/// Top-level rows of the shop search results
pub const RESULT_ROW: &str = ".ant-table-row.ant-table-row-level-0";

/// Display name inside a result row (excludes the grey secondary line)
pub const RESULT_ROW_NAME: &str = "div.line-clamp-1:not(.text-base-999)";

/// Sidebar navigation links on the shop detail page
pub const SIDEBAR_LINK: &str = "div.flex.flex-col a";

pub const CREATOR_TABLE: &str = "table";

pub const TABLE_BODY_ROW: &str = "tbody > tr";

pub const TABLE_CELL: &str = "td";

/// Enabled "next page" control of the creator table
pub const NEXT_PAGE: &str = "li.ant-pagination-next:not(.ant-pagination-disabled)";

/// Sidebar entry text that leads to the creator table
pub const CREATOR_TAB_TEXT: &str = "Creator";

/// Page text that indicates the session is not authenticated
pub const LOGIN_MARKERS: [&str; 2] = ["Login", "Sign In"];
