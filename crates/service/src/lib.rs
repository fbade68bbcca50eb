//! Service layer of the podcast host: account lifecycle and the
//! podcast/episode catalog on top of `models`.
//! - Expected failures come back as typed errors with stable messages,
//!   never as panics or raw store errors crossing the boundary.
//! - Stores and the token issuer are constructor-injected traits; each
//!   ships an in-memory mock next to its trait definition.

pub mod errors;
pub mod account;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
