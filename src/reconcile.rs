// src/reconcile.rs
use tracing::info;

use crate::posting::{Posting, PostingSet};

/// This run's postings split against the previous snapshot.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    /// In this run, not in the snapshot. Newest first.
    pub added: Vec<Posting>,
    /// In both. Newest first, carrying this run's field values.
    pub unchanged: Vec<Posting>,
    /// The snapshot was empty or missing.
    pub first_run: bool,
}

/// Split `live` by canonical link against `persisted`.
///
/// Postings that disappeared since the last run are not reported; they drop
/// out when the snapshot is overwritten. Both outputs are sorted by elapsed
/// age ascending with a stable sort, so equal ages keep `live` order.
pub fn reconcile(live: &PostingSet, persisted: &PostingSet) -> Reconciliation {
    let (mut added, mut unchanged): (Vec<Posting>, Vec<Posting>) = live
        .iter()
        .cloned()
        .partition(|p| !persisted.contains(p.key()));

    added.sort_by_key(|p| p.age_duration);
    unchanged.sort_by_key(|p| p.age_duration);

    info!(
        live = live.len(),
        persisted = persisted.len(),
        added = added.len(),
        unchanged = unchanged.len(),
        "reconciled"
    );
    Reconciliation { added, unchanged, first_run: persisted.is_empty() }
}
