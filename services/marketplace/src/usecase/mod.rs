pub mod account_admin;
pub mod job_post;
pub mod registration;
pub mod session;
