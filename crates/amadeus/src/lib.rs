//! Amadeus flight-data provider.
//!
//! - [`auth`] -- client-credentials exchange and the bearer [`TokenCache`].
//! - [`client`] -- [`AmadeusClient`], the `LiveProvider` implementation.

pub mod auth;
pub mod client;

pub use auth::{AuthError, ClientCredentials, TokenCache};
pub use client::{AmadeusClient, AmadeusConfig, UnconfiguredAmadeus};
