//! Domain logic for the Wander travel backend.
//!
//! - [`location`] -- key normalization shared by every lookup table.
//! - [`catalog`] -- static tables and curated datasets loaded at startup.
//! - [`resolution`] -- static-first, live-second data resolution policy.
//! - [`provider`] -- traits implemented by the upstream HTTP clients.
//! - [`chat`] -- rule-based chat intent matching and reply formatting.

pub mod catalog;
pub mod chat;
pub mod error;
pub mod location;
pub mod provider;
pub mod resolution;
