// src/browser.rs
//
// Everything the acquirer needs from a browser, and a headless Chrome
// implementation of it. One session drives one tab and serves one fetch
// at a time; parallel workers each open their own session.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub trait PageSession {
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// True if an element matching `css` shows up within `timeout`.
    fn probe(&mut self, css: &str, timeout: Duration) -> Result<bool>;

    fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Total rendered height of the document body.
    fn content_height(&mut self) -> Result<u64>;

    fn page_source(&mut self) -> Result<String>;
}

/// Opens sessions for workers. Shared across worker threads.
pub trait SessionFactory: Sync {
    type Session: PageSession;

    fn open(&self) -> Result<Self::Session>;
}

pub struct Chrome {
    browser: Browser,
}

impl Chrome {
    pub fn launch(headless: bool) -> Result<Self> {
        // Images are never needed for listing markup.
        let args = [OsStr::new("--blink-settings=imagesEnabled=false")];
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .args(args.to_vec())
            .build()
            .map_err(|e| Error::Browser(format!("launch options: {e}")))?;
        let browser = Browser::new(options).map_err(browser_err)?;
        info!(headless, "chrome started");
        Ok(Self { browser })
    }
}

impl SessionFactory for Chrome {
    type Session = ChromeSession;

    fn open(&self) -> Result<ChromeSession> {
        let tab = self.browser.new_tab().map_err(browser_err)?;
        Ok(ChromeSession { tab })
    }
}

pub struct ChromeSession {
    tab: Arc<Tab>,
}

impl ChromeSession {
    fn eval_u64(&self, js: &str) -> Result<u64> {
        let obj = self.tab.evaluate(js, false).map_err(browser_err)?;
        obj.value
            .as_ref()
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
            .ok_or_else(|| Error::Browser(format!("non-numeric result from {js:?}")))
    }
}

impl PageSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(browser_err)?;
        self.tab.wait_until_navigated().map_err(browser_err)?;
        Ok(())
    }

    fn probe(&mut self, css: &str, timeout: Duration) -> Result<bool> {
        match self.tab.wait_for_element_with_custom_timeout(css, timeout) {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(css, error = %e, "probe missed");
                Ok(false)
            }
        }
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        self.tab
            .evaluate("window.scrollTo(0, document.body.scrollHeight)", false)
            .map_err(browser_err)?;
        Ok(())
    }

    fn content_height(&mut self) -> Result<u64> {
        self.eval_u64("document.body.scrollHeight")
    }

    fn page_source(&mut self) -> Result<String> {
        self.tab.get_content().map_err(browser_err)
    }
}

fn browser_err(e: impl std::fmt::Display) -> Error {
    Error::Browser(e.to_string())
}
