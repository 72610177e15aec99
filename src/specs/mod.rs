// src/specs/mod.rs
//! # Page-reading specs
//!
//! Knowledge of *where the data lives in the markup* of the results site.
//! A spec takes one raw fragment captured by `extract` and turns it into a
//! typed record, or explains why it could not.
//!
//! ## What lives here
//! - Selector choice inside a posting card (which link is the title, where
//!   the location and relative age sit). The selectors themselves come from
//!   `config::CardMarkers` so a markup change is a config change.
//! - The per-posting filter: keyword inclusion, forbidden-word exclusion and
//!   the age cutoff.
//!
//! ## What does **not** live here
//! - Fetching, retrying and scrolling (`acquire`).
//! - Persistence and diffing against the previous run (`store`, `reconcile`).
//!
//! ## Conventions
//! - Specs depend on `core::Markup`, never on a concrete DOM type.
//! - A card with an unexpected shape is a per-card `Outcome::Malformed`;
//!   only conditions that would corrupt ordering (an unknown age unit) are
//!   returned as errors.
pub mod posting;
