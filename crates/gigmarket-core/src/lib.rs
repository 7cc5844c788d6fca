//! Service plumbing shared by Gigmarket binaries: configuration loading,
//! tracing, request-id/trace layers, health handlers and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
