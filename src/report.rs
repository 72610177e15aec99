// src/report.rs
use std::io::{self, Write};

use crate::posting::Posting;
use crate::reconcile::Reconciliation;
use crate::runner::RunSummary;

pub fn render<W: Write>(mut w: W, r: &Reconciliation) -> io::Result<()> {
    if r.first_run {
        return group(&mut w, "List of available jobs", &r.added);
    }
    group(&mut w, "Added jobs since last run", &r.added)?;
    group(&mut w, "Unchanged jobs since last run", &r.unchanged)
}

/// Report plus the skipped-card footer, if any cards were skipped.
pub fn render_summary<W: Write>(mut w: W, s: &RunSummary) -> io::Result<()> {
    render(&mut w, &s.reconciliation)?;
    if s.malformed > 0 {
        writeln!(w, "Skipped {} malformed postings", s.malformed)?;
    }
    Ok(())
}

fn group<W: Write>(w: &mut W, label: &str, postings: &[Posting]) -> io::Result<()> {
    writeln!(w, "{label} ({}):", postings.len())?;
    for p in postings {
        writeln!(
            w,
            "Title: {} | Location: {} | Posted: {} | Company: {} | Link: {}",
            p.title, p.location, p.age_text, p.company, p.canonical_link
        )?;
    }
    Ok(())
}
