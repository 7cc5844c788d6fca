//! Job-post domain constants.

/// Status assigned to a job post when the client does not supply one.
pub const DEFAULT_JOB_STATUS: &str = "open";

/// Resolve the status for a new post: blank or absent falls back to the default.
pub fn initial_status(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => DEFAULT_JOB_STATUS.to_owned(),
    }
}
