// tests/common/mod.rs
//
// A scripted stand-in for the browser. Each URL has a list of visits; every
// navigation consumes the next one and the last one repeats forever.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jobwatch::browser::{PageSession, SessionFactory};
use jobwatch::config::{AcquireOptions, AppOptions};
use jobwatch::{Error, Result};

#[derive(Clone, Debug)]
pub enum Visit {
    /// Navigation itself errors.
    Fails,
    /// Page loads but neither marker ever appears.
    Partial,
    /// The "no results for this query" page.
    Invalid,
    /// Results page; heights are reported in order, the last one repeating.
    Results { html: String, heights: Vec<u64> },
}

impl Visit {
    pub fn results(html: String) -> Self {
        Visit::Results { html, heights: vec![1_000] }
    }
}

#[derive(Default)]
pub struct FakeSite {
    invalid_marker: String,
    card_marker: String,
    script: Mutex<HashMap<String, Vec<Visit>>>,
    pub navigations: AtomicUsize,
    pub scrolls: AtomicUsize,
    pub sessions: AtomicUsize,
}

impl FakeSite {
    pub fn new(opts: &AcquireOptions) -> Arc<Self> {
        Arc::new(Self {
            invalid_marker: opts.invalid_marker.clone(),
            card_marker: opts.card_marker.clone(),
            ..Self::default()
        })
    }

    pub fn script(&self, url: &str, visits: Vec<Visit>) {
        self.script.lock().unwrap().insert(url.to_string(), visits);
    }

    fn next_visit(&self, url: &str) -> Visit {
        let mut script = self.script.lock().unwrap();
        match script.get_mut(url) {
            Some(v) if v.len() > 1 => v.remove(0),
            Some(v) if v.len() == 1 => v[0].clone(),
            _ => Visit::Partial,
        }
    }

    pub fn navigations(&self) -> usize {
        self.navigations.load(Ordering::SeqCst)
    }
}

pub struct FakeFactory(pub Arc<FakeSite>);

impl SessionFactory for FakeFactory {
    type Session = FakeSession;

    fn open(&self) -> Result<FakeSession> {
        self.0.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession { site: Arc::clone(&self.0), current: None })
    }
}

pub struct FakeSession {
    site: Arc<FakeSite>,
    current: Option<Visit>,
}

impl FakeSession {
    pub fn on(site: &Arc<FakeSite>, visit: Visit) -> Self {
        FakeSession { site: Arc::clone(site), current: Some(visit) }
    }
}

impl PageSession for FakeSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.site.navigations.fetch_add(1, Ordering::SeqCst);
        let visit = self.site.next_visit(url);
        if matches!(visit, Visit::Fails) {
            self.current = None;
            return Err(Error::Browser(format!("connection reset loading {url}")));
        }
        self.current = Some(visit);
        Ok(())
    }

    fn probe(&mut self, css: &str, _timeout: Duration) -> Result<bool> {
        Ok(match &self.current {
            Some(Visit::Invalid) => css == self.site.invalid_marker,
            Some(Visit::Results { .. }) => css == self.site.card_marker,
            _ => false,
        })
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        self.site.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn content_height(&mut self) -> Result<u64> {
        match &mut self.current {
            Some(Visit::Results { heights, .. }) => {
                let h = heights[0];
                if heights.len() > 1 {
                    heights.remove(0);
                }
                Ok(h)
            }
            _ => Ok(0),
        }
    }

    fn page_source(&mut self) -> Result<String> {
        match &self.current {
            Some(Visit::Results { html, .. }) => Ok(html.clone()),
            _ => Ok(String::from("<html><body></body></html>")),
        }
    }
}

/// Acquisition settings with every wait set to zero.
pub fn fast_acquire() -> AcquireOptions {
    AcquireOptions {
        base_url: String::from("https://jobs.test/search"),
        probe_timeout_ms: 0,
        settle_timeout_ms: 0,
        poll_interval_ms: 0,
        retry_base_ms: 0,
        retry_cap_ms: 0,
        jitter_ms: 0,
        max_attempts: 5,
        ..AcquireOptions::default()
    }
}

pub fn fast_options() -> AppOptions {
    let mut o = AppOptions::default();
    o.acquire = fast_acquire();
    o.search.keywords = vec![String::from("student"), String::from("intern")];
    o.search.cutoff_time_in_months = 1;
    o
}

pub fn card(id: &str, title: &str, age: &str) -> String {
    card_with_href(title, age, &format!("https://jobs.test/view/{id}?refId=r{id}&trk=search"))
}

pub fn card_with_href(title: &str, age: &str, href: &str) -> String {
    format!(
        r#"<li><div class="base-card relative job-search-card">
             <a class="base-card__full-link" href="{href}"><span class="sr-only">{title}</span></a>
             <div class="base-search-card__info">
               <h4><a class="hidden-nested-link" href="https://jobs.test/company/acme">Acme</a></h4>
               <span class="job-search-card__location">Haifa, Haifa District, Israel</span>
               <time class="job-search-card__listdate">{age}</time>
             </div>
           </div></li>"#
    )
}

pub fn page(cards: &[String]) -> String {
    format!("<html><body><ul class=\"jobs-search__results-list\">{}</ul></body></html>", cards.concat())
}

pub fn link(id: &str) -> String {
    format!("https://jobs.test/view/{id}")
}
