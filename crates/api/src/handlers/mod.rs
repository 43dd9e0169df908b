//! Request handlers.
//!
//! Handlers parse path and body input, delegate to the resolver or the
//! weather provider held in [`AppState`](crate::state::AppState), and map
//! failures via [`AppError`](crate::error::AppError).

pub mod chat;
pub mod lookup;
pub mod weather;
