//! Quote Sync
//!
//! Keeps a local collection of short text quotes, persists it across
//! restarts, and periodically reconciles it with a remote collection
//! fetched over HTTP.
//!
//! # Modules
//!
//! - `quotes`: collection, store, filters and preferences
//! - `sync`: reconciler, remote endpoint, coordinator and scheduler
//! - `storage`: durable and session key-value backends
//! - `routes`: JSON API over the collection and the coordinator

pub mod config;
pub mod error;
pub mod quotes;
pub mod routes;
pub mod state;
pub mod storage;
pub mod sync;
