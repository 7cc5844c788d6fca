//! Bearer-token identity extractors.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use gigmarket_domain::id::AccountId;

use crate::token::{TokenInfo, validate_access_token};

/// HS256 secret the extractors validate access tokens with.
///
/// Services expose it from their state with `impl FromRef<AppState> for JwtSecret`.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Caller holding a currently-valid access token (`Authorization: Bearer <access>`).
///
/// Returns 401 if the header is absent, the token fails validation, or it is a
/// refresh token. Role checks happen later, against the caller's profile.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub account_id: AccountId,
    pub token: TokenInfo,
}

/// Resolve the bearer access token in `headers`, if any. Never fails loudly.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Option<Authenticated> {
    let header = headers.typed_get::<Authorization<Bearer>>()?;
    let info = validate_access_token(header.token(), secret).ok()?;
    Some(Authenticated {
        account_id: info.account_id,
        token: info,
    })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Validate synchronously and hand back a 'static future so the returned
    // future does not borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let identity = authenticate(&parts.headers, &secret.0);
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
