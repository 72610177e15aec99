// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use super::consts::*;
use crate::error::{Error, Result};

/// Everything a run needs, built once at startup and passed down by reference.
/// Every section can be given in a TOML file; missing keys keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub search: SearchOptions,
    pub acquire: AcquireOptions,
    pub markers: CardMarkers,
    pub store: StoreOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    pub job_titles: Vec<String>,
    pub country: String,
    pub keywords: Vec<String>,
    pub forbidden_words: Vec<String>,
    pub cutoff_time_in_months: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            job_titles: owned(DEFAULT_JOB_TITLES),
            country: s!(DEFAULT_COUNTRY),
            keywords: owned(DEFAULT_KEYWORDS),
            forbidden_words: owned(DEFAULT_FORBIDDEN_WORDS),
            cutoff_time_in_months: DEFAULT_CUTOFF_MONTHS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcquireOptions {
    pub base_url: String,
    /// Present only on the "no results / bad query" page.
    pub invalid_marker: String,
    /// One per posting card; may share its element with other classes.
    pub card_marker: String,
    pub probe_timeout_ms: u64,
    pub settle_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_scroll_rounds: u32,
    /// 0 retries forever.
    pub max_attempts: u32,
    pub retry_base_ms: u64,
    pub retry_cap_ms: u64,
    pub jitter_ms: u64,
    pub passes: usize,
    pub workers: usize,
    pub headless: bool,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            invalid_marker: s!(INVALID_QUERY_MARKER),
            card_marker: s!(CARD_MARKER),
            probe_timeout_ms: PROBE_TIMEOUT_MS,
            settle_timeout_ms: SETTLE_TIMEOUT_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            max_scroll_rounds: MAX_SCROLL_ROUNDS,
            max_attempts: MAX_ATTEMPTS,
            retry_base_ms: RETRY_BASE_MS,
            retry_cap_ms: RETRY_CAP_MS,
            jitter_ms: JITTER_MS,
            passes: PASSES_PER_URL,
            workers: WORKERS,
            headless: true,
        }
    }
}

impl AcquireOptions {
    pub fn probe_timeout(&self) -> Duration { Duration::from_millis(self.probe_timeout_ms) }
    pub fn settle_timeout(&self) -> Duration { Duration::from_millis(self.settle_timeout_ms) }
    pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }

    pub fn attempt_limit(&self) -> Option<u32> {
        (self.max_attempts > 0).then_some(self.max_attempts)
    }

    /// Delay before attempt `attempt + 1`, without jitter:
    /// `retry_base * 2^(attempt-1)`, capped at `retry_cap`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(20);
        let ms = self.retry_base_ms.saturating_mul(1u64 << shift);
        Duration::from_millis(ms.min(self.retry_cap_ms))
    }
}

/// Selectors used inside one posting card.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardMarkers {
    pub link: String,
    pub location: String,
    pub age: String,
}

impl Default for CardMarkers {
    fn default() -> Self {
        Self {
            link: s!(CARD_LINK),
            location: s!(CARD_LOCATION),
            age: s!(CARD_AGE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    pub snapshot: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(SNAPSHOT_FILE),
            log_dir: PathBuf::from(LOG_DIR),
        }
    }
}

/// Command-line values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub snapshot: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub max_attempts: Option<u32>,
    pub headful: bool,
}

impl AppOptions {
    /// Defaults, then the TOML file (if any), then `overrides`; validated.
    pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut opts = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                info!(path = %path.display(), "loaded config file");
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };
        opts.apply(overrides);
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply(&mut self, o: &Overrides) {
        if let Some(p) = &o.snapshot { self.store.snapshot = p.clone(); }
        if let Some(p) = &o.log_dir { self.store.log_dir = p.clone(); }
        if let Some(n) = o.workers { self.acquire.workers = n; }
        if let Some(n) = o.max_attempts { self.acquire.max_attempts = n; }
        if o.headful { self.acquire.headless = false; }
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.search;
        if s.job_titles.is_empty() {
            return Err(Error::Config(s!("at least one job title is required")));
        }
        if let Some(bad) = s.job_titles.iter().find(|t| t.split_whitespace().next().is_none()) {
            return Err(Error::Config(format!("job title {bad:?} has no words")));
        }
        if self.acquire.passes == 0 {
            return Err(Error::Config(s!("passes must be at least 1")));
        }
        if self.acquire.workers == 0 {
            return Err(Error::Config(s!("workers must be at least 1")));
        }
        Ok(())
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| s!(*w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_search() {
        let o = AppOptions::default();
        assert_eq!(o.search.job_titles, vec![s!("student software")]);
        assert_eq!(o.search.keywords, vec![s!("student"), s!("intern")]);
        assert!(o.search.forbidden_words.is_empty());
        assert_eq!(o.acquire.passes, 2);
        assert_eq!(o.acquire.attempt_limit(), Some(20));
        assert!(o.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_named_keys() {
        let o = AppOptions::from_toml(
            r#"
            [search]
            job_titles = ["junior developer", "qa intern"]
            forbidden_words = ["senior"]
            cutoff_time_in_months = 2

            [acquire]
            workers = 3
            max_attempts = 0
            "#,
        )
        .unwrap();
        assert_eq!(o.search.job_titles.len(), 2);
        assert_eq!(o.search.country, "Israel");
        assert_eq!(o.search.cutoff_time_in_months, 2);
        assert_eq!(o.acquire.workers, 3);
        assert_eq!(o.acquire.attempt_limit(), None);
        assert_eq!(o.acquire.card_marker, CARD_MARKER);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppOptions::from_toml("[search]\ntitles = [\"x\"]\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn validation_catches_empty_titles() {
        let mut o = AppOptions::default();
        o.search.job_titles = vec![s!("   ")];
        assert!(o.validate().is_err());
        o.search.job_titles.clear();
        assert!(o.validate().is_err());
    }

    #[test]
    fn overrides_win() {
        let mut o = AppOptions::default();
        o.apply(&Overrides {
            snapshot: Some(PathBuf::from("out/jobs.csv")),
            workers: Some(4),
            max_attempts: Some(0),
            headful: true,
            ..Overrides::default()
        });
        assert_eq!(o.store.snapshot, PathBuf::from("out/jobs.csv"));
        assert_eq!(o.acquire.workers, 4);
        assert_eq!(o.acquire.attempt_limit(), None);
        assert!(!o.acquire.headless);
    }

    #[test]
    fn backoff_doubles_then_caps() {
        let a = AcquireOptions::default();
        assert_eq!(a.backoff(1), Duration::from_millis(500));
        assert_eq!(a.backoff(2), Duration::from_millis(1_000));
        assert_eq!(a.backoff(4), Duration::from_millis(4_000));
        assert_eq!(a.backoff(5), Duration::from_millis(8_000));
        assert_eq!(a.backoff(40), Duration::from_millis(8_000));
    }
}
