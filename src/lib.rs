// Library interface for shop_creators_scraper
// The binary is a thin wrapper; tests drive the workflow through these modules

pub mod browser;
pub mod config;
pub mod exporter;
pub mod filter;
pub mod helpers;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod retry;
pub mod runner;
pub mod shops;
