//! # ytinfo-store
//!
//! Persistent guild and user settings for ytinfo (SQLite-backed).

pub mod store;

pub use store::Store;
