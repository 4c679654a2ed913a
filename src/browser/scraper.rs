use super::manager::BrowserError;
use super::page::{Locator, Page, PageElement};
use headless_chrome::protocol::cdp::DOM::NodeId;
use headless_chrome::{Browser, Element, Tab};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

const NEW_PAGE_POLL: Duration = Duration::from_millis(100);

/// [`Page`] implementation over a headless Chrome tab
pub struct ChromePage {
    browser: Arc<Browser>,
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn new(browser: Arc<Browser>, tab: Arc<Tab>) -> Self {
        Self { browser, tab }
    }

    fn open_tabs(&self) -> Result<Vec<Arc<Tab>>, BrowserError> {
        self.browser
            .get_tabs()
            .lock()
            .map(|tabs| tabs.clone())
            .map_err(|_| BrowserError::InteractionError("tab list lock poisoned".to_string()))
    }

    /// Resolve a locator to a single element, preferring the innermost text match
    fn locate(&self, locator: &Locator<'_>) -> Result<Element<'_>, BrowserError> {
        let candidates = self
            .tab
            .find_elements(locator.css)
            .map_err(|_| BrowserError::ElementNotFound(locator.to_string()))?;

        let found = match locator.has_text {
            None => candidates.into_iter().next(),
            Some(_) => candidates
                .into_iter()
                .filter_map(|element| {
                    let text = element.get_inner_text().ok()?;
                    locator.matches_text(&text).then_some((text.len(), element))
                })
                .min_by_key(|(len, _)| *len)
                .map(|(_, element)| element),
        };

        found.ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))
    }
}

impl Page for ChromePage {
    type Element = ChromeElement;

    fn goto(&self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.tab.set_default_timeout(timeout);

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    fn click(&self, locator: &Locator<'_>) -> Result<(), BrowserError> {
        self.locate(locator)?
            .click()
            .map_err(|e| BrowserError::InteractionError(format!("Click on '{}' failed: {}", locator, e)))?;
        Ok(())
    }

    fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let input = self
            .tab
            .find_element(selector)
            .map_err(|_| BrowserError::ElementNotFound(selector.to_string()))?;

        input
            .call_js_fn("function() { this.value = ''; }", vec![], false)
            .map_err(|e| BrowserError::InteractionError(format!("Clearing '{}' failed: {}", selector, e)))?;

        input
            .type_into(value)
            .map_err(|e| BrowserError::InteractionError(format!("Typing into '{}' failed: {}", selector, e)))?;

        Ok(())
    }

    fn press(&self, selector: &str, key: &str) -> Result<(), BrowserError> {
        self.tab
            .find_element(selector)
            .map_err(|_| BrowserError::ElementNotFound(selector.to_string()))?
            .focus()
            .map_err(|e| BrowserError::InteractionError(format!("Focusing '{}' failed: {}", selector, e)))?;

        self.tab
            .press_key(key)
            .map_err(|e| BrowserError::InteractionError(format!("Pressing {} failed: {}", key, e)))?;

        Ok(())
    }

    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| BrowserError::Timeout(format!("selector {} after {:?}", selector, timeout)))?;
        Ok(())
    }

    fn query(&self, selector: &str) -> Result<Option<ChromeElement>, BrowserError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ChromeElement>, BrowserError> {
        // headless_chrome reports an empty match as an error
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(detach(&self.tab, elements)),
            Err(e) => {
                log::debug!("No elements for '{}': {}", selector, e);
                Ok(Vec::new())
            }
        }
    }

    fn content(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    fn open_in_new_page(&self, element: &ChromeElement, timeout: Duration) -> Result<Self, BrowserError> {
        let known: HashSet<String> = self
            .open_tabs()?
            .iter()
            .map(|tab| tab.get_target_id().clone())
            .collect();

        element.click()?;

        let start = Instant::now();
        loop {
            let spawned = self
                .open_tabs()?
                .into_iter()
                .find(|tab| !known.contains(tab.get_target_id()));

            if let Some(tab) = spawned {
                tab.set_default_timeout(timeout);
                tab.wait_until_navigated()
                    .map_err(|e| BrowserError::NavigationError(format!("New page did not load: {}", e)))?;
                return Ok(ChromePage::new(Arc::clone(&self.browser), tab));
            }

            if start.elapsed() > timeout {
                return Err(BrowserError::NoNewPage(format!("nothing opened within {:?}", timeout)));
            }

            std::thread::sleep(NEW_PAGE_POLL);
        }
    }

    fn is_closed(&self) -> bool {
        let id = self.tab.get_target_id();
        match self.open_tabs() {
            Ok(tabs) => !tabs.iter().any(|tab| tab.get_target_id() == id),
            Err(_) => true,
        }
    }

    fn close(&self) -> Result<(), BrowserError> {
        if self.is_closed() {
            return Ok(());
        }
        self.tab
            .close(false)
            .map_err(|e| BrowserError::InteractionError(format!("Closing tab failed: {}", e)))?;
        Ok(())
    }
}

fn detach(tab: &Arc<Tab>, elements: Vec<Element<'_>>) -> Vec<ChromeElement> {
    elements
        .into_iter()
        .map(|element| ChromeElement {
            tab: Arc::clone(tab),
            node_id: element.node_id,
        })
        .collect()
}

/// Element handle that outlives the borrow of its tab by keeping the node id
pub struct ChromeElement {
    tab: Arc<Tab>,
    node_id: NodeId,
}

impl ChromeElement {
    fn resolve(&self) -> Result<Element<'_>, BrowserError> {
        Element::new(&self.tab, self.node_id)
            .map_err(|e| BrowserError::ElementNotFound(format!("node {}: {}", self.node_id, e)))
    }
}

impl PageElement for ChromeElement {
    fn inner_text(&self) -> Result<String, BrowserError> {
        self.resolve()?
            .get_inner_text()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    fn click(&self) -> Result<(), BrowserError> {
        self.resolve()?
            .click()
            .map_err(|e| BrowserError::InteractionError(format!("Click failed: {}", e)))?;
        Ok(())
    }

    fn query(&self, selector: &str) -> Result<Option<Self>, BrowserError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>, BrowserError> {
        let element = self.resolve()?;
        match element.find_elements(selector) {
            Ok(children) => Ok(detach(&self.tab, children)),
            Err(e) => {
                log::debug!("No child elements for '{}': {}", selector, e);
                Ok(Vec::new())
            }
        }
    }
}
