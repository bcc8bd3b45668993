//! Cookoff core library.
//!
//! Shared building blocks for the Cookoff server:
//! - SQLite pool helpers and common database errors
//! - The fixed entrant roster

pub mod db;
pub mod entrants;

pub use db::{DatabaseError, unix_timestamp};
pub use entrants::Roster;
