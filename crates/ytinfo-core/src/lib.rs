//! # ytinfo-core
//!
//! Core types, traits, configuration, and error handling for the ytinfo bot.

pub mod config;
pub mod error;
pub mod message;
pub mod settings;
pub mod traits;
pub mod video;

pub use config::shellexpand;
