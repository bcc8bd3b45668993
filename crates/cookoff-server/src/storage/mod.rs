//! SQLite storage for Cookoff ratings.
//!
//! One table, one invariant: at most one rating per (entrant, device) pair.

mod db;
mod models;
mod queries;

pub use db::RatingsDatabase;
pub use models::{EntrantAggregate, Rating};
