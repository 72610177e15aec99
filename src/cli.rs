// src/cli.rs
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{
    browser::Chrome,
    config::{AppOptions, Overrides},
    error::Result,
    log,
    progress::Progress,
    report, runner,
};

/// Scrape job search results and show what changed since the last run.
#[derive(Debug, Parser)]
#[command(name = "jobwatch", version)]
pub struct Args {
    /// TOML file with [search], [acquire], [markers] and [store] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Snapshot CSV from the previous run (overwritten at the end)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Directory for debug.log
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Parallel browser tabs
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Give up on a page after this many attempts
    #[arg(long, conflicts_with = "unbounded_retries")]
    pub max_attempts: Option<u32>,

    /// Retry incomplete pages forever
    #[arg(long)]
    pub unbounded_retries: bool,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            snapshot: self.snapshot.clone(),
            log_dir: self.log_dir.clone(),
            workers: self.workers,
            max_attempts: if self.unbounded_retries { Some(0) } else { self.max_attempts },
            headful: self.headful,
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let opts = AppOptions::resolve(args.config.as_deref(), &args.overrides())?;
    log::init(&opts.store.log_dir)?;
    info!(
        titles = opts.search.job_titles.len(),
        country = %opts.search.country,
        snapshot = %opts.store.snapshot.display(),
        "run started"
    );

    let chrome = Chrome::launch(opts.acquire.headless)?;
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, &chrome, Some(&mut progress))?;

    report::render_summary(io::stdout().lock(), &summary)?;
    Ok(())
}

/// Progress lines on stderr so stdout carries only the report.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, url: &str, cards: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {cards} postings from {url}", self.done, self.total);
    }
}
