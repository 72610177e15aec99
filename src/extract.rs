// src/extract.rs
use std::collections::HashSet;

use tracing::debug;

use crate::core::html::{map_matches, selector};
use crate::core::sanitize::strip_query;
use crate::error::Result;

/// One posting card as it appeared on the page.
///
/// `key` is the card's identity across passes: the first link's target with
/// its query string removed, or the serialized markup when the card has no
/// link at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawListing {
    pub key: String,
    pub html: String,
}

impl RawListing {
    pub fn new(key: impl Into<String>, html: impl Into<String>) -> Self {
        Self { key: key.into(), html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Every card matching `card_marker` in a loaded page, in document order.
pub fn extract_listings(page: &str, card_marker: &str) -> Result<Vec<RawListing>> {
    let link = selector("a[href]")?;
    let cards = map_matches(page, card_marker, |el| {
        let html = el.html();
        let key = el
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| s!(strip_query(href.trim())))
            .unwrap_or_else(|| html.clone());
        RawListing { key, html }
    })?;
    debug!(cards = cards.len(), "extracted cards");
    Ok(cards)
}

/// Cards accumulated over every pass of every URL. A card seen again, on a
/// later pass or from another query, is kept once at its first position.
#[derive(Clone, Debug, Default)]
pub struct ListingSet {
    seen: HashSet<String>,
    items: Vec<RawListing>,
}

impl ListingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass's cards; returns how many were new.
    pub fn extend_pass<I: IntoIterator<Item = RawListing>>(&mut self, cards: I) -> usize {
        let before = self.items.len();
        for card in cards {
            if self.seen.insert(card.key.clone()) {
                self.items.push(card);
            }
        }
        self.items.len() - before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawListing> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32) -> String {
        format!(
            r#"<div class="base-card"><a href="https://x.test/view/{id}?trk=s">Student {id}</a><a href="/c">Acme</a></div>"#
        )
    }

    fn page(ids: &[u32]) -> String {
        let body: String = ids.iter().map(|&i| card(i)).collect();
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn second_pass_adds_only_missing_cards() {
        let mut set = ListingSet::new();
        let first = extract_listings(&page(&[1, 2]), "div.base-card").unwrap();
        let second = extract_listings(&page(&[1, 2, 3]), "div.base-card").unwrap();
        assert_eq!(set.extend_pass(first), 2);
        assert_eq!(set.extend_pass(second), 1);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn same_page_parsed_twice_collapses() {
        let page = format!(
            "<html><body>{}</body></html>",
            r#"<div class="base-card job-search-card" data-entity="urn:1"><a class="base-card__full-link" href="https://x.test/view/1?trk=a" data-tracking="x">Student</a><a class="hidden-nested-link" href="/c">Acme</a></div>"#
        );
        let mut set = ListingSet::new();
        for _ in 0..2 {
            set.extend_pass(extract_listings(&page, "div.base-card").unwrap());
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn tracking_parameters_do_not_split_a_card() {
        let a = r#"<div class="base-card"><a href="https://x.test/view/7?trk=a">Student</a><a href="/c">Acme</a></div>"#;
        let b = r#"<div class="base-card"><a href="https://x.test/view/7?trk=b">Student</a><a href="/c">Acme</a></div>"#;
        let mut set = ListingSet::new();
        assert_eq!(set.extend_pass(extract_listings(&format!("<html><body>{a}</body></html>"), "div.base-card").unwrap()), 1);
        assert_eq!(set.extend_pass(extract_listings(&format!("<html><body>{b}</body></html>"), "div.base-card").unwrap()), 0);
        assert_eq!(set.iter().next().unwrap().key, "https://x.test/view/7");
    }

    #[test]
    fn card_without_link_is_keyed_by_markup() {
        let page = r#"<html><body><div class="base-card"><time>1 day ago</time></div><div class="base-card"><time>2 days ago</time></div></body></html>"#;
        let cards = extract_listings(page, "div.base-card").unwrap();
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].key, cards[1].key);
        assert!(cards[0].key.starts_with("<div"));
    }

    #[test]
    fn empty_page_yields_nothing() {
        let cards = extract_listings("<html><body><p>nothing</p></body></html>", "div.base-card").unwrap();
        assert!(cards.is_empty());
    }
}
