//! Query engine: session resolution, intent classification, and reply
//! composition over a scrape provider.

pub mod core;
pub mod phrases;

pub use core::{QueryEngine, Reply};
