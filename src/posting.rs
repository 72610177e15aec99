// src/posting.rs
//
// A posting is identified by its canonical link alone. Title, company and
// the relative age text drift between scrapes of the same listing, so
// identity lives in `PostingSet`'s key rather than in a derived `PartialEq`.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;

#[derive(Clone, Debug)]
pub struct Posting {
    pub title: String,
    pub location: String,
    pub age_text: String,
    pub age_duration: Duration,
    pub company: String,
    pub canonical_link: String,
}

impl Posting {
    /// Build a posting, deriving the elapsed age from `age_text`.
    pub fn new(
        title: String,
        location: String,
        age_text: String,
        company: String,
        canonical_link: String,
    ) -> Result<Self> {
        let age_duration = parse_age(&age_text)?;
        Ok(Self { title, location, age_text, age_duration, company, canonical_link })
    }

    pub fn key(&self) -> &str {
        &self.canonical_link
    }

    pub fn same_entity(&self, other: &Posting) -> bool {
        self.canonical_link == other.canonical_link
    }
}

/// "3 days ago" → 3 days. Accepts minute/hour/day/week/month, singular or
/// plural, with or without the trailing "ago". A month counts as 30 days.
pub fn parse_age(text: &str) -> Result<Duration> {
    let mut words = text.split_whitespace();
    let count: u64 = words
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::MalformedAge(text.to_string()))?;
    let unit = words
        .next()
        .ok_or_else(|| Error::MalformedAge(text.to_string()))?;

    let secs = match unit.to_ascii_lowercase().trim_end_matches('s') {
        "minute" => MINUTE,
        "hour" => HOUR,
        "day" => DAY,
        "week" => WEEK,
        "month" => MONTH,
        _ => {
            return Err(Error::UnknownTimeUnit {
                text: text.to_string(),
                unit: unit.to_string(),
            })
        }
    };
    Ok(Duration::from_secs(count.saturating_mul(secs)))
}

/// Completed 30-day months in `age`. The cutoff filter compares this, not
/// the raw duration, so "61 days ago" is within a two-month cutoff.
pub fn whole_months(age: Duration) -> u64 {
    age.as_secs() / MONTH
}

/// Insertion-ordered set of postings keyed by canonical link.
/// The first posting inserted under a link wins.
#[derive(Clone, Debug, Default)]
pub struct PostingSet {
    items: Vec<Posting>,
    index: HashMap<String, usize>,
}

impl PostingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing entry) when the link is taken.
    pub fn insert(&mut self, posting: Posting) -> bool {
        if self.index.contains_key(posting.key()) {
            return false;
        }
        self.index.insert(posting.canonical_link.clone(), self.items.len());
        self.items.push(posting);
        true
    }

    pub fn contains(&self, link: &str) -> bool {
        self.index.contains_key(link)
    }

    pub fn get(&self, link: &str) -> Option<&Posting> {
        self.index.get(link).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Posting> {
        self.items
    }
}

impl FromIterator<Posting> for PostingSet {
    fn from_iter<I: IntoIterator<Item = Posting>>(iter: I) -> Self {
        let mut set = PostingSet::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PostingSet {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
