use super::manager::BrowserError;
use std::fmt;
use std::time::Duration;

/// A CSS selector, optionally narrowed to elements whose text contains a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator<'a> {
    pub css: &'a str,
    pub has_text: Option<&'a str>,
}

impl<'a> Locator<'a> {
    pub const fn css(css: &'a str) -> Self {
        Self { css, has_text: None }
    }

    pub const fn with_text(css: &'a str, text: &'a str) -> Self {
        Self {
            css,
            has_text: Some(text),
        }
    }

    /// Whether an element's rendered text satisfies the text constraint
    pub fn matches_text(&self, text: &str) -> bool {
        match self.has_text {
            Some(fragment) => text.contains(fragment),
            None => true,
        }
    }
}

impl fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.has_text {
            Some(text) => write!(f, "{} >> text={}", self.css, text),
            None => f.write_str(self.css),
        }
    }
}

/// The narrow set of page interactions the scrape workflow needs.
///
/// Implementations report every failure as a [`BrowserError`]; deciding
/// whether a failure is transient, shop-fatal or run-fatal is left to the
/// caller.
pub trait Page: Sized {
    type Element: PageElement;

    /// Navigate to `url` and wait for the load to finish
    fn goto(&self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Click the element matching `locator`. With a text constraint the
    /// innermost match (shortest rendered text) is clicked.
    fn click(&self, locator: &Locator<'_>) -> Result<(), BrowserError>;

    /// Replace the value of the input matching `selector`
    fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Press a named key (e.g. "Enter") with the element matching `selector` focused
    fn press(&self, selector: &str, key: &str) -> Result<(), BrowserError>;

    /// Block until an element matching `selector` exists or `timeout` elapses
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    fn query(&self, selector: &str) -> Result<Option<Self::Element>, BrowserError>;

    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError>;

    /// Full rendered HTML of the page
    fn content(&self) -> Result<String, BrowserError>;

    /// Click `element`, expecting it to open a new tab, and return that tab
    /// once its initial load has finished.
    fn open_in_new_page(&self, element: &Self::Element, timeout: Duration)
        -> Result<Self, BrowserError>;

    fn is_closed(&self) -> bool;

    /// Close the page's tab. Closing an already closed page succeeds.
    fn close(&self) -> Result<(), BrowserError>;
}

/// A handle to a rendered element on a [`Page`]
pub trait PageElement: Sized {
    fn inner_text(&self) -> Result<String, BrowserError>;

    fn click(&self) -> Result<(), BrowserError>;

    fn query(&self, selector: &str) -> Result<Option<Self>, BrowserError>;

    fn query_all(&self, selector: &str) -> Result<Vec<Self>, BrowserError>;
}
