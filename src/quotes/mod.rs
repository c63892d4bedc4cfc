//! Quote module
//!
//! The local quote collection and the read-only views over it.
//!
//! # Features
//!
//! - Collection with a no-duplicate-text invariant
//! - Store that persists after every mutation and falls back to the seed
//!   quotes when the snapshot is missing or corrupt
//! - Category filters, random pick, JSON import/export
//! - Selected-category and last-viewed preferences

pub mod filter;
mod preferences;
mod store;
mod types;

pub use filter::{CategoryFilter, ALL_CATEGORIES};
pub use preferences::Preferences;
pub use store::{load, InsertOutcome, QuoteStore, StoreTransaction};
pub use types::{Collection, Quote};
