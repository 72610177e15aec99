// src/runner.rs
use tracing::{info, warn};

use crate::{
    browser::SessionFactory,
    config::AppOptions,
    error::Result,
    posting::PostingSet,
    progress::Progress,
    query::build_urls,
    reconcile::{reconcile, Reconciliation},
    scrape::collect_listings,
    specs::posting::{parse_listing, FilterRules, Outcome},
    store::{load_snapshot, save_snapshot},
};

/// What one run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub reconciliation: Reconciliation,
    /// Cards skipped because their markup had an unexpected shape.
    pub malformed: usize,
    /// Cards dropped by the keyword, forbidden-word or age rules.
    pub rejected: usize,
}

/// Build queries, scrape, filter, diff against the snapshot, then overwrite
/// the snapshot. Any error returns before the snapshot is touched.
pub fn run<F: SessionFactory>(
    opts: &AppOptions,
    factory: &F,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let snapshot = &opts.store.snapshot;
    let persisted = load_snapshot(snapshot)?;

    let urls = build_urls(&opts.acquire.base_url, &opts.search.job_titles, &opts.search.country);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Searching {} quer{}", urls.len(), if urls.len() == 1 { "y" } else { "ies" }));
    }
    let listings = collect_listings(factory, &urls, &opts.acquire, progress)?;

    let rules = FilterRules::from_search(&opts.search);
    let mut live = PostingSet::new();
    let (mut malformed, mut rejected) = (0usize, 0usize);
    for raw in listings.iter() {
        match parse_listing(raw, &opts.markers, &rules)? {
            Outcome::Kept(posting) => { live.insert(posting); }
            Outcome::Rejected(_) => rejected += 1,
            Outcome::Malformed(why) => {
                warn!(%why, "skipping malformed posting");
                malformed += 1;
            }
        }
    }
    info!(cards = listings.len(), kept = live.len(), rejected, malformed, "postings filtered");

    let reconciliation = reconcile(&live, &persisted);
    save_snapshot(snapshot, &live)?;

    Ok(RunSummary { reconciliation, malformed, rejected })
}
