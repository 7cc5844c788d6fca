//! Field length limits enforced on user-supplied input.

pub const USERNAME_MAX_LEN: usize = 150;
pub const NAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PHONE_MAX_LEN: usize = 15;
pub const LOCATION_MAX_LEN: usize = 100;
pub const JOB_TITLE_MAX_LEN: usize = 255;
pub const JOB_STATUS_MAX_LEN: usize = 50;

/// Check a required text field: non-blank and at most `max` characters.
pub fn is_valid_required(value: &str, max: usize) -> bool {
    !value.trim().is_empty() && value.chars().count() <= max
}

/// Check an optional text field: may be empty, at most `max` characters.
pub fn is_valid_optional(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}
