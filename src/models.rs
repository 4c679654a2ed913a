use crate::helpers::{parse_magnitude, strip_currency};

/// Revenue cell of a creator row
#[derive(Debug, Clone, PartialEq)]
pub enum Revenue {
    /// Text as displayed, e.g. "$1.5k"
    Raw(String),
    /// Normalized value; `None` when the text could not be parsed
    Parsed(Option<f64>),
}

impl Revenue {
    /// Convert displayed text to a parsed value. Parsed values pass through unchanged.
    pub fn normalized(self) -> Self {
        match self {
            Revenue::Raw(text) => Revenue::Parsed(parse_magnitude(strip_currency(&text))),
            parsed => parsed,
        }
    }

    /// Numeric value, if known
    pub fn value(&self) -> Option<f64> {
        match self {
            Revenue::Raw(_) => None,
            Revenue::Parsed(value) => *value,
        }
    }
}

/// One row of a shop's creator table
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorRecord {
    pub name: String,
    pub creator: String,
    pub account_type: String,
    pub revenue: Revenue,
    pub product: String,
    pub live: String,
    /// The queried shop name, not the name the page displays
    pub shop_name: String,
}

/// Outcome of scraping one shop
#[derive(Debug, Clone, PartialEq)]
pub enum ShopResult {
    NotFound,
    Found(Vec<CreatorRecord>),
}

impl ShopResult {
    pub fn records(&self) -> &[CreatorRecord] {
        match self {
            ShopResult::NotFound => &[],
            ShopResult::Found(records) => records,
        }
    }
}

/// Per-shop record batches accumulated over a run, in processing order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AggregatedOutput {
    batches: Vec<Vec<CreatorRecord>>,
}

impl AggregatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shop's records. `NotFound` and empty results leave the output
    /// untouched; returns whether anything was appended.
    pub fn absorb(&mut self, result: ShopResult) -> bool {
        match result {
            ShopResult::Found(records) if !records.is_empty() => {
                self.batches.push(records);
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of shops that contributed records
    pub fn shop_count(&self) -> usize {
        self.batches.len()
    }

    /// Total record count across all shops
    pub fn len(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// All records flattened in shop order
    pub fn records(&self) -> impl Iterator<Item = &CreatorRecord> {
        self.batches.iter().flatten()
    }
}
