// src/lib.rs

#[macro_use]
pub mod macros;

pub mod acquire;
pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod extract;
pub mod log;
pub mod posting;
pub mod progress;
pub mod query;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod store;

pub use error::{Error, Result};
