// src/scrape.rs
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc,
};
use std::thread;

use tracing::{debug, info, warn};

use crate::{
    acquire::Acquirer,
    browser::{PageSession, SessionFactory},
    config::AcquireOptions,
    error::{Error, Result},
    extract::{extract_listings, ListingSet, RawListing},
    progress::Progress,
};

enum Msg {
    Pass { index: usize, pass: usize, cards: Vec<RawListing> },
    Failed(Error),
}

/// Fetch every URL `opts.passes` times and collect the posting cards.
///
/// With `opts.workers > 1` URLs are spread over a pool, one browser session
/// per worker. Passes are merged in URL order, then pass order, so the result
/// does not depend on which worker finished first. The first fatal error
/// stops every worker before its next request, including one stuck
/// retrying a page, and is returned.
pub fn collect_listings<F: SessionFactory>(
    factory: &F,
    urls: &[String],
    opts: &AcquireOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ListingSet> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(urls.len() * opts.passes);
    }

    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let workers = opts.workers.min(urls.len()).max(1);
    let mut passes: Vec<Vec<Option<Vec<RawListing>>>> = vec![vec![None; opts.passes]; urls.len()];
    let mut first_err: Option<Error> = None;

    let work = |worker: usize, tx: mpsc::Sender<Msg>| {
        let mut session = match factory.open() {
            Ok(s) => s,
            Err(e) => {
                stop.store(true, Ordering::Relaxed);
                let _ = tx.send(Msg::Failed(e));
                return;
            }
        };
        loop {
            let i = next.fetch_add(1, Ordering::Relaxed);
            if i >= urls.len() {
                break;
            }
            for pass in 0..opts.passes {
                if stop.load(Ordering::Relaxed) {
                    debug!(worker, "stopping early");
                    return;
                }
                match fetch_pass(&mut session, opts, &urls[i], &stop) {
                    Ok(cards) => {
                        let _ = tx.send(Msg::Pass { index: i, pass, cards });
                    }
                    Err(Error::Cancelled { url }) => {
                        debug!(worker, url, "fetch cancelled");
                        return;
                    }
                    Err(e) => {
                        stop.store(true, Ordering::Relaxed);
                        let _ = tx.send(Msg::Failed(e));
                        return;
                    }
                }
            }
        }
    };

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<Msg>();
        for worker in 0..workers {
            let tx = tx.clone();
            scope.spawn(move || work(worker, tx));
        }
        drop(tx);

        for msg in rx {
            match msg {
                Msg::Pass { index, pass, cards } => {
                    let url = &urls[index];
                    info!(url, pass = pass + 1, cards = cards.len(), "pass done");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(url, cards.len());
                    }
                    passes[index][pass] = Some(cards);
                }
                Msg::Failed(e) => {
                    warn!(error = %e, "fetch failed, stopping workers");
                    first_err.get_or_insert(e);
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    if let Some(e) = first_err {
        return Err(e);
    }

    let mut listings = ListingSet::new();
    for (url, url_passes) in urls.iter().zip(passes) {
        let new: usize = url_passes.into_iter().flatten().map(|cards| listings.extend_pass(cards)).sum();
        debug!(url, new, "merged");
    }
    info!(urls = urls.len(), cards = listings.len(), "listings collected");
    Ok(listings)
}

fn fetch_pass<S: PageSession>(
    session: &mut S,
    opts: &AcquireOptions,
    url: &str,
    stop: &AtomicBool,
) -> Result<Vec<RawListing>> {
    let html = Acquirer::new(session, opts).stop_on(stop).acquire(url)?;
    info!(url, bytes = html.len(), "page acquired");
    extract_listings(&html, &opts.card_marker)
}
