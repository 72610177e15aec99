// src/store.rs
//
// The snapshot is the previous run's filtered postings, one per line:
//   title,location,age_text,company,canonical_link
// Elapsed age is not stored; it is re-derived from age_text on load.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::csv::{parse_records, write_record};
use crate::error::{Error, Result};
use crate::posting::{Posting, PostingSet};

const FIELDS: usize = 5;

/// Postings from the last run. A missing file means there was no last run.
pub fn load_snapshot(path: &Path) -> Result<PostingSet> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot yet");
            return Ok(PostingSet::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut set = PostingSet::new();
    for rec in parse_records(&text) {
        let found = rec.fields.len();
        let Ok([title, location, age_text, company, link]) = <[String; FIELDS]>::try_from(rec.fields) else {
            return Err(Error::MalformedRow { line: rec.line, found });
        };
        if !set.insert(Posting::new(title, location, age_text, company, link)?) {
            warn!(line = rec.line, "duplicate link in snapshot, keeping first");
        }
    }
    info!(path = %path.display(), postings = set.len(), "snapshot loaded");
    Ok(set)
}

/// Replace the snapshot with `postings`.
pub fn save_snapshot(path: &Path, postings: &PostingSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    for p in postings {
        write_record(
            &mut out,
            &[
                p.title.as_str(),
                p.location.as_str(),
                p.age_text.as_str(),
                p.company.as_str(),
                p.canonical_link.as_str(),
            ],
        )?;
    }
    out.flush()?;
    info!(path = %path.display(), postings = postings.len(), "snapshot saved");
    Ok(())
}
