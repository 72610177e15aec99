// src/config/consts.rs

// Search
pub const BASE_URL: &str = "https://www.linkedin.com/jobs/search";
pub const DEFAULT_JOB_TITLES: &[&str] = &["student software"];
pub const DEFAULT_COUNTRY: &str = "Israel";
pub const DEFAULT_KEYWORDS: &[&str] = &["student", "intern"];
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &[];
pub const DEFAULT_CUTOFF_MONTHS: u32 = 1;

// Page markers
pub const INVALID_QUERY_MARKER: &str = "section.two-pane-serp-page__results-list--empty, h1.no-results__main-title";
pub const CARD_MARKER: &str = "div.base-card";
pub const CARD_LINK: &str = "a";
pub const CARD_LOCATION: &str = ".job-search-card__location";
pub const CARD_AGE: &str = "time";

// Acquisition
pub const PROBE_TIMEOUT_MS: u64 = 500;
pub const SETTLE_TIMEOUT_MS: u64 = 1_000;
pub const POLL_INTERVAL_MS: u64 = 100;
pub const MAX_SCROLL_ROUNDS: u32 = 200;
pub const MAX_ATTEMPTS: u32 = 20;
pub const RETRY_BASE_MS: u64 = 500;
pub const RETRY_CAP_MS: u64 = 8_000;
pub const JITTER_MS: u64 = 250;
pub const PASSES_PER_URL: usize = 2;
pub const WORKERS: usize = 1;

// Local state
pub const SNAPSHOT_FILE: &str = "jobs.csv";
pub const LOG_DIR: &str = ".store";
