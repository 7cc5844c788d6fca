//! Auth types shared across Gigmarket crates.
//!
//! Provides session JWT issue/validation, the stateless activation-token
//! generator, and the bearer-token `Authenticated` extractor.

pub mod activation;
pub mod identity;
pub mod token;
