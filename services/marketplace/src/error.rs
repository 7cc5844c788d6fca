use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Marketplace service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("passwords don't match")]
    PasswordMismatch,
    #[error("email already exists")]
    EmailTaken,
    #[error("username already exists")]
    UsernameTaken,
    #[error("account already exists")]
    AccountExists,
    #[error("invalid {0}")]
    InvalidField(&'static str),
    #[error("missing data")]
    MissingData,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user data not found")]
    ProfileMissing,
    #[error("refresh token required")]
    RefreshTokenRequired,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("permission denied")]
    Forbidden,
    #[error("job post not found")]
    JobNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("confirmation email could not be sent")]
    NotificationFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketplaceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::AccountExists => "ACCOUNT_EXISTS",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ProfileMissing => "PROFILE_MISSING",
            Self::RefreshTokenRequired => "REFRESH_TOKEN_REQUIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::JobNotFound => "JOB_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Request field a validation error is attached to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::PasswordMismatch => Some("confirm_password"),
            Self::EmailTaken => Some("email"),
            Self::UsernameTaken => Some("username"),
            Self::InvalidField(field) => Some(field),
            _ => None,
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PasswordMismatch
            | Self::EmailTaken
            | Self::UsernameTaken
            | Self::AccountExists
            | Self::InvalidField(_)
            | Self::MissingData
            | Self::RefreshTokenRequired
            | Self::InvalidToken => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::JobNotFound | Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::NotificationFailed(_) => StatusCode::BAD_GATEWAY,
            Self::ProfileMissing | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors and TraceLayer already records the status.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::NotificationFailed(e) => {
                tracing::error!(
                    error = %format!("{e:#}"),
                    kind = "NOTIFICATION_FAILED",
                    "mail delivery failed"
                );
            }
            _ => {}
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::from(field);
        }
        (status, axum::Json(body)).into_response()
    }
}
