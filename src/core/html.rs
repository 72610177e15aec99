// src/core/html.rs
//
// The only place that knows about the concrete DOM type. Card parsing works
// against `Markup`, so it can be driven by any tree that can locate
// descendants by CSS selector, read normalized text and read attributes.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::error::{Error, Result};

pub trait Markup: Sized {
    /// All descendants matching `css`, in document order.
    fn find_all(&self, css: &str) -> Result<Vec<Self>>;

    fn find_first(&self, css: &str) -> Result<Option<Self>> {
        Ok(self.find_all(css)?.into_iter().next())
    }

    /// Text content with whitespace runs collapsed and ends trimmed.
    fn inner_text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css:?}: {e:?}")))
}

impl<'a> Markup for ElementRef<'a> {
    fn find_all(&self, css: &str) -> Result<Vec<Self>> {
        let sel = selector(css)?;
        Ok(self.select(&sel).collect())
    }

    fn inner_text(&self) -> String {
        let raw: String = self.text().collect();
        normalize_ws(&raw)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }
}

/// Parse `doc` once and apply `f` to every element matching `css`, in
/// document order. The parsed tree does not outlive the call.
pub fn map_matches<T, F>(doc: &str, css: &str, f: F) -> Result<Vec<T>>
where
    F: FnMut(ElementRef<'_>) -> T,
{
    let sel = selector(css)?;
    let doc = Html::parse_document(doc);
    Ok(doc.select(&sel).map(f).collect())
}
