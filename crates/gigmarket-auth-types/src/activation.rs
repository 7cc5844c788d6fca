//! Stateless account-activation tokens.
//!
//! A token is `"{issued_at}-{mac}"` where `mac` is HMAC-SHA256 over the account id,
//! its credential hash, email, `is_active` flag, last-login time and `issued_at`.
//! Nothing is persisted: once any of the bound account fields changes (in
//! particular `is_active` flipping to `true`) the token no longer verifies.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use gigmarket_domain::id::AccountId;

use crate::token::now_secs;

type HmacSha256 = Hmac<Sha256>;

/// Account fields an activation token is bound to.
#[derive(Debug, Clone, Copy)]
pub struct BoundAccount<'a> {
    pub account_id: AccountId,
    pub credential_hash: &'a str,
    pub email: &'a str,
    pub is_active: bool,
    /// Last successful login, seconds since epoch.
    pub last_login: Option<i64>,
}

#[derive(Clone)]
pub struct ActivationTokens {
    secret: Vec<u8>,
    ttl_secs: u64,
}

impl std::fmt::Debug for ActivationTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationTokens")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl ActivationTokens {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn make_token(&self, account: &BoundAccount<'_>) -> String {
        self.make_token_at(account, now_secs())
    }

    pub fn make_token_at(&self, account: &BoundAccount<'_>, issued_at: u64) -> String {
        let mac = self.mac(account, issued_at).finalize().into_bytes();
        format!("{issued_at}-{}", URL_SAFE_NO_PAD.encode(mac))
    }

    pub fn check_token(&self, account: &BoundAccount<'_>, token: &str) -> bool {
        self.check_token_at(account, token, now_secs())
    }

    /// Verify `token` against the account's current state at time `now`.
    pub fn check_token_at(&self, account: &BoundAccount<'_>, token: &str, now: u64) -> bool {
        let Some((ts, sig)) = token.split_once('-') else {
            return false;
        };
        if ts.is_empty() || !ts.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let Ok(issued_at) = ts.parse::<u64>() else {
            return false;
        };
        let Ok(sig) = URL_SAFE_NO_PAD.decode(sig) else {
            return false;
        };
        if issued_at > now || now - issued_at > self.ttl_secs {
            return false;
        }
        self.mac(account, issued_at).verify_slice(&sig).is_ok()
    }

    fn mac(&self, account: &BoundAccount<'_>, issued_at: u64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length");
        mac.update(account.account_id.as_uuid().as_bytes());
        mac.update(b"\x1f");
        mac.update(account.credential_hash.as_bytes());
        mac.update(b"\x1f");
        mac.update(account.email.as_bytes());
        mac.update(b"\x1f");
        mac.update(&[u8::from(account.is_active)]);
        mac.update(&account.last_login.unwrap_or(0).to_be_bytes());
        mac.update(&issued_at.to_be_bytes());
        mac
    }
}

/// Encode an account id for the confirmation link (base64url of its UUID string).
pub fn encode_uid(account_id: AccountId) -> String {
    URL_SAFE_NO_PAD.encode(account_id.to_string())
}

/// Decode the `uid` path segment of a confirmation link. `None` on any malformed input.
pub fn decode_uid(uid: &str) -> Option<AccountId> {
    let bytes = URL_SAFE_NO_PAD.decode(uid.trim_end_matches('=')).ok()?;
    let s = std::str::from_utf8(&bytes).ok()?;
    s.parse().ok()
}
