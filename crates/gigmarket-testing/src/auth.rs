//! Bearer-token helpers for tests.
//!
//! Issues real access/refresh JWTs signed with [`TEST_JWT_SECRET`], so requests
//! pass through the same `Authenticated` extractor as production traffic.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

use gigmarket_auth_types::token::{IssuedToken, TokenKind, issue_token};
use gigmarket_domain::id::AccountId;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity a test request acts as.
pub struct MockAuth {
    pub account_id: AccountId,
}

impl MockAuth {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }

    pub fn access_token(&self) -> IssuedToken {
        issue_token(self.account_id, TokenKind::Access, 300, TEST_JWT_SECRET)
            .expect("sign test access token")
    }

    pub fn refresh_token(&self) -> IssuedToken {
        issue_token(self.account_id, TokenKind::Refresh, 3600, TEST_JWT_SECRET)
            .expect("sign test refresh token")
    }

    /// `Authorization: Bearer <access>` for this identity.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let value = format!("Bearer {}", self.access_token().token);
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).expect("JWT is a valid header value"),
        );
        map
    }
}
