//! Session JWTs: short-lived access tokens and revocable refresh tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gigmarket_domain::id::AccountId;

/// Which half of the session pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims payload shared by access and refresh tokens.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account id (UUID string) |
/// | `jti` | `jti` | token id, the revocation-set key |
/// | `typ` | custom | `"access"` or `"refresh"` |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub jti: String,
    pub typ: TokenKind,
    pub exp: u64,
}

/// Identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub account_id: AccountId,
    pub token_id: Uuid,
    pub kind: TokenKind,
    pub exp: u64,
}

/// A freshly signed token together with the values the caller may need to persist.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_id: Uuid,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token kind")]
    WrongKind,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a new token of `kind` for `account_id`, valid for `ttl_secs`.
pub fn issue_token(
    account_id: AccountId,
    kind: TokenKind,
    ttl_secs: u64,
    secret: &str,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let token_id = Uuid::new_v4();
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: account_id.to_string(),
        jti: token_id.to_string(),
        typ: kind,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(IssuedToken {
        token,
        token_id,
        exp,
    })
}

/// Seconds past `exp` during which a token still validates.
pub const VALIDATION_LEEWAY_SECS: u64 = 60;

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = VALIDATION_LEEWAY_SECS;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a token and require it to be of `expected` kind.
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    secret: &str,
) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.typ != expected {
        return Err(AuthError::WrongKind);
    }
    let account_id = claims
        .sub
        .parse::<AccountId>()
        .map_err(|_| AuthError::Malformed)?;
    let token_id = claims
        .jti
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        account_id,
        token_id,
        kind: claims.typ,
        exp: claims.exp,
    })
}

/// Validate an `Authorization: Bearer` access token.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_token(token, TokenKind::Access, secret)
}

/// Validate a refresh token. Signature and expiry only; revocation is checked by the caller.
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_token(token, TokenKind::Refresh, secret)
}
