//! Domain types shared across Gigmarket crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod id;
pub mod job;
pub mod limits;
pub mod role;
