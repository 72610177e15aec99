// src/specs/posting.rs
//
// Card layout (results page):
//   <div class="base-card ...">
//     <a href="/jobs/view/<id>?<tracking>"> title </a>     first link
//     <a href="/company/..."> company </a>                 second link
//     <span class="job-search-card__location">City, Region, Country</span>
//     <time datetime="2024-01-01">3 days ago</time>
//   </div>

use std::time::Duration;

use scraper::Html;
use tracing::debug;

use crate::config::{CardMarkers, SearchOptions};
use crate::core::Markup;
use crate::core::sanitize::{city_only, find_any_ci, strip_query};
use crate::error::Result;
use crate::extract::RawListing;
use crate::posting::{parse_age, whole_months, Posting};

/// Inclusion, exclusion and age rules applied to every card.
#[derive(Clone, Debug)]
pub struct FilterRules<'a> {
    pub keywords: &'a [String],
    pub forbidden: &'a [String],
    pub cutoff_months: u32,
}

impl<'a> FilterRules<'a> {
    pub fn from_search(search: &'a SearchOptions) -> Self {
        Self {
            keywords: &search.keywords,
            forbidden: &search.forbidden_words,
            cutoff_months: search.cutoff_time_in_months,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    NoKeyword,
    Forbidden(String),
    TooOld(Duration),
}

#[derive(Clone, Debug)]
pub enum Outcome {
    Kept(Posting),
    Rejected(Rejection),
    /// Card did not have the expected shape; skipped.
    Malformed(String),
}

pub fn parse_listing(raw: &RawListing, markers: &CardMarkers, rules: &FilterRules) -> Result<Outcome> {
    let doc = Html::parse_fragment(raw.html());
    parse_card(&doc.root_element(), markers, rules)
}

/// Checks run in a fixed order and stop at the first rejection.
pub fn parse_card<N: Markup>(card: &N, markers: &CardMarkers, rules: &FilterRules) -> Result<Outcome> {
    let links = card.find_all(&markers.link)?;
    let [title_link, company_link] = match <[N; 2]>::try_from(links) {
        Ok(pair) => pair,
        Err(links) => return Ok(malformed(format!("expected 2 links, found {}", links.len()))),
    };

    let title = title_link.inner_text();
    if !rules.keywords.is_empty() && find_any_ci(&title, rules.keywords).is_none() {
        debug!(%title, "no keyword");
        return Ok(Outcome::Rejected(Rejection::NoKeyword));
    }
    if let Some(word) = find_any_ci(&title, rules.forbidden) {
        debug!(%title, word, "forbidden word");
        return Ok(Outcome::Rejected(Rejection::Forbidden(s!(word))));
    }

    let Some(location) = card.find_first(&markers.location)? else {
        return Ok(malformed(format!("no location element in {title:?}")));
    };
    let location = city_only(&location.inner_text());
    let company = company_link.inner_text();

    let Some(age) = card.find_first(&markers.age)? else {
        return Ok(malformed(format!("no age element in {title:?}")));
    };
    let age_text = age.inner_text();
    let age_duration = parse_age(&age_text)?;
    // Compared in whole months: "61 days ago" is 2 months old.
    if whole_months(age_duration) > u64::from(rules.cutoff_months) {
        debug!(%title, %age_text, "older than cutoff");
        return Ok(Outcome::Rejected(Rejection::TooOld(age_duration)));
    }

    let Some(href) = title_link.attribute("href") else {
        return Ok(malformed(format!("title link without href in {title:?}")));
    };
    let canonical_link = s!(strip_query(href.trim()));

    Ok(Outcome::Kept(Posting { title, location, age_text, age_duration, company, canonical_link }))
}

fn malformed(why: String) -> Outcome {
    debug!(%why, "malformed card");
    Outcome::Malformed(why)
}
