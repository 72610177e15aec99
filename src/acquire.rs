// src/acquire.rs
//
// Fetching one results page from a target that sometimes serves a partial
// or unrelated page. Every attempt ends in one of three ways: the "bad
// query" marker is present (fatal), a posting card is present (drive lazy
// loading to the end and return the markup), or neither (try again).

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::browser::PageSession;
use crate::config::AcquireOptions;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Requesting { attempt: u32 },
    InvalidDetected,
    ContentDetected,
    Exhausted { attempts: u32 },
}

pub struct Acquirer<'a, S: PageSession + ?Sized> {
    session: &'a mut S,
    opts: &'a AcquireOptions,
    stop: Option<&'a AtomicBool>,
}

impl<'a, S: PageSession + ?Sized> Acquirer<'a, S> {
    pub fn new(session: &'a mut S, opts: &'a AcquireOptions) -> Self {
        Self { session, opts, stop: None }
    }

    /// Give up with `Error::Cancelled` before the next request once `stop`
    /// is set. Lets a worker pool end a run that another worker has failed.
    pub fn stop_on(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stopped(&self) -> bool {
        self.stop.is_some_and(|s| s.load(Ordering::Relaxed))
    }

    /// Markup of `url` once its results are fully loaded.
    pub fn acquire(&mut self, url: &str) -> Result<String> {
        let mut state = State::Requesting { attempt: 1 };
        loop {
            state = match state {
                State::Requesting { attempt } => {
                    if self.stopped() {
                        debug!(url, attempt, "stop requested");
                        return Err(Error::Cancelled { url: url.to_string() });
                    }
                    self.attempt(url, attempt)?
                }
                State::InvalidDetected => {
                    error!(url, "invalid search page");
                    return Err(Error::InvalidQuery { url: url.to_string() });
                }
                State::ContentDetected => {
                    self.scroll_to_end(url)?;
                    return self.session.page_source();
                }
                State::Exhausted { attempts } => {
                    error!(url, attempts, "giving up on page");
                    return Err(Error::Exhausted { url: url.to_string(), attempts });
                }
            };
        }
    }

    /// One navigation plus the two probes. Browser failures during the
    /// attempt count as a transient miss.
    pub fn attempt(&mut self, url: &str, attempt: u32) -> Result<State> {
        debug!(url, attempt, "requesting page");
        match self.classify(url) {
            Ok(Some(state)) => return Ok(state),
            Ok(None) => warn!(url, attempt, "no results rendered, retrying"),
            Err(e) => warn!(url, attempt, error = %e, "navigation failed, retrying"),
        }

        if self.opts.attempt_limit().is_some_and(|max| attempt >= max) {
            return Ok(State::Exhausted { attempts: attempt });
        }
        let delay = self.retry_delay(attempt);
        debug!(url, delay_ms = delay.as_millis() as u64, "backing off");
        thread::sleep(delay);
        Ok(State::Requesting { attempt: attempt + 1 })
    }

    fn classify(&mut self, url: &str) -> Result<Option<State>> {
        let timeout = self.opts.probe_timeout();
        self.session.navigate(url)?;
        if self.session.probe(&self.opts.invalid_marker, timeout)? {
            return Ok(Some(State::InvalidDetected));
        }
        if self.session.probe(&self.opts.card_marker, timeout)? {
            return Ok(Some(State::ContentDetected));
        }
        Ok(None)
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        let jitter = if self.opts.jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.opts.jitter_ms)
        };
        self.opts.backoff(attempt) + Duration::from_millis(jitter)
    }

    /// Scroll until the body height stops growing. Returns the number of
    /// scroll rounds issued.
    pub fn scroll_to_end(&mut self, url: &str) -> Result<u32> {
        let mut last = self.session.content_height()?;
        for round in 1..=self.opts.max_scroll_rounds {
            self.session.scroll_to_bottom()?;
            let height = self.wait_for_growth(last)?;
            if height == last {
                debug!(url, rounds = round, height, "scroll converged");
                return Ok(round);
            }
            last = height;
        }
        warn!(url, rounds = self.opts.max_scroll_rounds, "scroll did not converge, using what is loaded");
        Ok(self.opts.max_scroll_rounds)
    }

    /// Poll the height until it differs from `last` or the settle window
    /// closes. Always measures at least once.
    fn wait_for_growth(&mut self, last: u64) -> Result<u64> {
        let deadline = Instant::now() + self.opts.settle_timeout();
        loop {
            let height = self.session.content_height()?;
            if height != last || Instant::now() >= deadline {
                return Ok(height);
            }
            thread::sleep(self.opts.poll_interval());
        }
    }
}

/// Convenience wrapper for a single fetch.
pub fn acquire<S: PageSession + ?Sized>(session: &mut S, opts: &AcquireOptions, url: &str) -> Result<String> {
    let html = Acquirer::new(session, opts).acquire(url)?;
    info!(url, bytes = html.len(), "page acquired");
    Ok(html)
}
