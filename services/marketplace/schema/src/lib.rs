//! sea-orm entities for the marketplace service.

pub mod accounts;
pub mod job_posts;
pub mod profiles;
pub mod revoked_tokens;
