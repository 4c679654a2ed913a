//! Scripted in-memory dashboard implementing the browser traits
#![allow(dead_code)]

use shop_creators_scraper::browser::{selectors, BrowserError, Locator, Page, PageElement};
use shop_creators_scraper::config::{Config, Timings};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Cell text whose read fails, standing in for a row that detached mid-read
pub const UNREADABLE_CELL: &str = "<detached>";

/// One shop as it appears in search results and on its detail page
#[derive(Clone)]
pub struct ShopFixture {
    pub display_name: String,
    pub sidebar: Vec<String>,
    /// Table pages, each a list of rows of cell texts
    pub pages: Vec<Vec<Vec<String>>>,
    /// "Next" stays enabled forever, cycling through `pages`
    pub next_always_enabled: bool,
    pub fails_to_open: bool,
    /// Detail tab closes after this many table pages were read
    pub closes_after_reads: Option<usize>,
    /// 1-based page on which the table never renders
    pub table_missing_on_page: Option<usize>,
    /// 1-based page whose "next" control fails to click
    pub next_fails_on_page: Option<usize>,
    /// Sidebar entries cannot be read
    pub sidebar_unreadable: bool,
}

impl ShopFixture {
    pub fn new(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            sidebar: ["Overview", "Product", "Creator", "Video"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            pages: Vec::new(),
            next_always_enabled: false,
            fails_to_open: false,
            closes_after_reads: None,
            table_missing_on_page: None,
            next_fails_on_page: None,
            sidebar_unreadable: false,
        }
    }

    pub fn with_pages(mut self, pages: Vec<Vec<Vec<String>>>) -> Self {
        self.pages = pages;
        self
    }
}

/// A six-column creator row
pub fn creator_row(name: &str, account_type: &str, revenue: &str) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{}\n@{}\n1.2k followers", name, name.to_lowercase()),
        account_type.to_string(),
        revenue.to_string(),
        "4".to_string(),
        "1".to_string(),
    ]
}

/// A six-column row whose revenue cell cannot be read
pub fn unreadable_row(name: &str) -> Vec<String> {
    let mut row = creator_row(name, "Affiliate", "$500");
    row[3] = UNREADABLE_CELL.to_string();
    row
}

/// Timings with every wait and delay at zero
pub fn instant_timings() -> Timings {
    Timings {
        page_load_timeout_ms: 0,
        login_grace_ms: 0,
        element_wait_timeout_ms: 0,
        new_page_timeout_ms: 0,
        click_retry_attempts: 4,
        click_retry_delay_ms: 0,
        region_switch_settle_ms: 0,
        shop_tab_settle_ms: 0,
        filter_tab_settle_ms: 0,
        search_settle_ms: 0,
        creator_tab_settle_ms: 0,
        page_turn_ms: 0,
        between_shops_ms: 0,
    }
}

pub fn test_config() -> Config {
    Config {
        timings: instant_timings(),
        ..Config::default()
    }
}

pub struct Dashboard {
    pub shops: Vec<ShopFixture>,
    pub body: String,
    pub has_filter_tab: Cell<bool>,
    pub search_input_broken: Cell<bool>,
    pub shop_tab_broken: Cell<bool>,
    pub region_switch_broken: Cell<bool>,
    pub shop_tab_clicks: Cell<usize>,
    pub filter_tab_clicks: Cell<usize>,
    pub region_switch_clicks: Cell<usize>,
    pub searches: RefCell<Vec<String>>,
    /// Fixture indices whose detail page was opened, in order
    pub opened: RefCell<Vec<usize>>,
    pub details: RefCell<Vec<Rc<DetailState>>>,
}

impl Dashboard {
    pub fn new(shops: Vec<ShopFixture>) -> Rc<Self> {
        Rc::new(Self {
            shops,
            body: "<html><body><div id='page_header_left'>Shop Creator</div></body></html>".to_string(),
            has_filter_tab: Cell::new(false),
            search_input_broken: Cell::new(false),
            shop_tab_broken: Cell::new(false),
            region_switch_broken: Cell::new(false),
            shop_tab_clicks: Cell::new(0),
            filter_tab_clicks: Cell::new(0),
            region_switch_clicks: Cell::new(0),
            searches: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            details: RefCell::new(Vec::new()),
        })
    }

    pub fn with_body(shops: Vec<ShopFixture>, body: &str) -> Rc<Self> {
        let mut dashboard = Self::new(shops);
        if let Some(inner) = Rc::get_mut(&mut dashboard) {
            inner.body = body.to_string();
        }
        dashboard
    }

    pub fn page(self: &Rc<Self>) -> FakePage {
        FakePage::Home(Rc::clone(self))
    }
}

pub struct DetailState {
    pub fixture: ShopFixture,
    pub creator_open: Cell<bool>,
    pub current: Cell<usize>,
    pub reads: Cell<usize>,
    pub turns: Cell<usize>,
    pub closed: Cell<bool>,
    pub close_calls: Cell<usize>,
}

impl DetailState {
    pub fn new(fixture: ShopFixture) -> Rc<Self> {
        Rc::new(Self {
            fixture,
            creator_open: Cell::new(false),
            current: Cell::new(0),
            reads: Cell::new(0),
            turns: Cell::new(0),
            closed: Cell::new(false),
            close_calls: Cell::new(0),
        })
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let pages = &self.fixture.pages;
        if pages.is_empty() {
            return Vec::new();
        }
        pages[self.current.get() % pages.len()].clone()
    }

    fn has_next(&self) -> bool {
        self.fixture.next_always_enabled || self.current.get() + 1 < self.fixture.pages.len()
    }
}

pub enum FakePage {
    Home(Rc<Dashboard>),
    Detail(Rc<DetailState>),
}

impl FakePage {
    /// A detail page already switched to the Creator view
    pub fn creator_view(fixture: ShopFixture) -> (Self, Rc<DetailState>) {
        let state = DetailState::new(fixture);
        state.creator_open.set(true);
        (FakePage::Detail(Rc::clone(&state)), state)
    }
}

pub enum FakeElement {
    ResultRow(usize, String),
    Label(String),
    SidebarLink(Rc<DetailState>, String),
    TableRow(Vec<String>),
    Cell(String),
    Next(Rc<DetailState>),
}

fn timeout(selector: &str) -> BrowserError {
    BrowserError::Timeout(format!("selector {}", selector))
}

fn not_found(what: impl ToString) -> BrowserError {
    BrowserError::ElementNotFound(what.to_string())
}

fn tally(counter: &Cell<usize>, broken: bool, locator: &Locator<'_>) -> Result<(), BrowserError> {
    counter.set(counter.get() + 1);
    if broken {
        Err(not_found(locator))
    } else {
        Ok(())
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn goto(&self, _url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    fn click(&self, locator: &Locator<'_>) -> Result<(), BrowserError> {
        match self {
            FakePage::Home(dashboard) => {
                if *locator == selectors::SHOP_TAB {
                    tally(&dashboard.shop_tab_clicks, dashboard.shop_tab_broken.get(), locator)
                } else if *locator == selectors::REGION_SWITCH {
                    tally(
                        &dashboard.region_switch_clicks,
                        dashboard.region_switch_broken.get(),
                        locator,
                    )
                } else if *locator == selectors::FILTER_TAB {
                    tally(&dashboard.filter_tab_clicks, !dashboard.has_filter_tab.get(), locator)
                } else {
                    Err(not_found(locator))
                }
            }
            FakePage::Detail(_) => Err(not_found(locator)),
        }
    }

    fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        match self {
            FakePage::Home(dashboard)
                if selector == selectors::SEARCH_INPUT && !dashboard.search_input_broken.get() =>
            {
                dashboard.searches.borrow_mut().push(value.to_string());
                Ok(())
            }
            _ => Err(not_found(selector)),
        }
    }

    fn press(&self, selector: &str, _key: &str) -> Result<(), BrowserError> {
        match self {
            FakePage::Home(dashboard)
                if selector == selectors::SEARCH_INPUT && !dashboard.search_input_broken.get() =>
            {
                Ok(())
            }
            _ => Err(not_found(selector)),
        }
    }

    fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<(), BrowserError> {
        match self {
            FakePage::Home(dashboard) => {
                if selector == selectors::RESULT_ROW && !dashboard.shops.is_empty() {
                    Ok(())
                } else {
                    Err(timeout(selector))
                }
            }
            FakePage::Detail(state) => {
                let page_num = state.current.get() + 1;
                let rendered = state.creator_open.get()
                    && state.fixture.table_missing_on_page != Some(page_num);
                if selector == selectors::CREATOR_TABLE && rendered {
                    Ok(())
                } else {
                    Err(timeout(selector))
                }
            }
        }
    }

    fn query(&self, selector: &str) -> Result<Option<FakeElement>, BrowserError> {
        match self {
            FakePage::Detail(state) if selector == selectors::NEXT_PAGE => {
                Ok(state.has_next().then(|| FakeElement::Next(Rc::clone(state))))
            }
            _ => Ok(self.query_all(selector)?.into_iter().next()),
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<FakeElement>, BrowserError> {
        match self {
            FakePage::Home(dashboard) if selector == selectors::RESULT_ROW => Ok(dashboard
                .shops
                .iter()
                .enumerate()
                .map(|(i, shop)| FakeElement::ResultRow(i, shop.display_name.clone()))
                .collect()),
            FakePage::Detail(state) if selector == selectors::SIDEBAR_LINK => Ok(state
                .fixture
                .sidebar
                .iter()
                .map(|text| FakeElement::SidebarLink(Rc::clone(state), text.clone()))
                .collect()),
            FakePage::Detail(state) if selector == selectors::TABLE_BODY_ROW => {
                state.reads.set(state.reads.get() + 1);
                if state.fixture.closes_after_reads == Some(state.reads.get()) {
                    state.closed.set(true);
                }
                Ok(state.rows().into_iter().map(FakeElement::TableRow).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn content(&self) -> Result<String, BrowserError> {
        match self {
            FakePage::Home(dashboard) => Ok(dashboard.body.clone()),
            FakePage::Detail(_) => Ok(String::new()),
        }
    }

    fn open_in_new_page(&self, element: &FakeElement, _timeout: Duration) -> Result<Self, BrowserError> {
        match (self, element) {
            (FakePage::Home(dashboard), FakeElement::ResultRow(i, _)) => {
                let fixture = dashboard.shops[*i].clone();
                if fixture.fails_to_open {
                    return Err(BrowserError::NoNewPage("row click did not open a tab".to_string()));
                }
                dashboard.opened.borrow_mut().push(*i);
                let state = DetailState::new(fixture);
                dashboard.details.borrow_mut().push(Rc::clone(&state));
                Ok(FakePage::Detail(state))
            }
            _ => Err(BrowserError::NoNewPage("not a result row".to_string())),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            FakePage::Home(_) => false,
            FakePage::Detail(state) => state.closed.get(),
        }
    }

    fn close(&self) -> Result<(), BrowserError> {
        if let FakePage::Detail(state) = self {
            state.close_calls.set(state.close_calls.get() + 1);
            state.closed.set(true);
        }
        Ok(())
    }
}

impl PageElement for FakeElement {
    fn inner_text(&self) -> Result<String, BrowserError> {
        match self {
            FakeElement::Cell(text) if text == UNREADABLE_CELL => {
                Err(BrowserError::HtmlExtractionError("node detached".to_string()))
            }
            FakeElement::SidebarLink(state, _) if state.fixture.sidebar_unreadable => {
                Err(BrowserError::HtmlExtractionError("sidebar detached".to_string()))
            }
            FakeElement::ResultRow(_, text)
            | FakeElement::Label(text)
            | FakeElement::SidebarLink(_, text)
            | FakeElement::Cell(text) => Ok(text.clone()),
            FakeElement::TableRow(cells) => Ok(cells.join("\t")),
            FakeElement::Next(_) => Ok(">".to_string()),
        }
    }

    fn click(&self) -> Result<(), BrowserError> {
        match self {
            FakeElement::SidebarLink(state, text) => {
                if text.contains("Creator") {
                    state.creator_open.set(true);
                }
                Ok(())
            }
            FakeElement::Next(state) => {
                if state.fixture.next_fails_on_page == Some(state.current.get() + 1) {
                    return Err(BrowserError::InteractionError("next control detached".to_string()));
                }
                state.current.set(state.current.get() + 1);
                state.turns.set(state.turns.get() + 1);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn query(&self, selector: &str) -> Result<Option<Self>, BrowserError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>, BrowserError> {
        match self {
            FakeElement::ResultRow(_, name) if selector == selectors::RESULT_ROW_NAME => {
                Ok(vec![FakeElement::Label(name.clone())])
            }
            FakeElement::TableRow(cells) if selector == selectors::TABLE_CELL => {
                Ok(cells.iter().cloned().map(FakeElement::Cell).collect())
            }
            _ => Ok(Vec::new()),
        }
    }
}
