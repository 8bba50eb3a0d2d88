//! # ytinfo
//!
//! Discord bot logic that answers YouTube links with localized video embeds.
//!
//! The platform adapter and the metadata provider plug in through the
//! [`ytinfo_core::traits::Channel`] and [`ytinfo_core::traits::VideoSource`]
//! traits; everything between them lives here.

pub mod commands;
pub mod format;
pub mod gateway;
pub mod links;
pub mod locale;
