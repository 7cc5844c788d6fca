use chrono::{DateTime, TimeDelta, Utc};

use gigmarket_auth_types::token::{
    TokenKind, VALIDATION_LEEWAY_SECS, issue_token, validate_refresh_token,
};
use gigmarket_domain::id::{AccountId, ProfileId};

use crate::domain::repository::{
    AccountRepository, CredentialHasher, ProfileRepository, RevokedTokenRepository,
};
use crate::domain::types::RevokedToken;
use crate::error::MarketplaceError;

/// JWT signing secret and lifetimes for the session token pair.
#[derive(Clone)]
pub struct SessionSettings {
    pub jwt_secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

fn issue(
    settings: &SessionSettings,
    account_id: AccountId,
    kind: TokenKind,
) -> Result<String, MarketplaceError> {
    let ttl = match kind {
        TokenKind::Access => settings.access_ttl_secs,
        TokenKind::Refresh => settings.refresh_ttl_secs,
    };
    let issued = issue_token(account_id, kind, ttl, &settings.jwt_secret)
        .map_err(|e| MarketplaceError::Internal(e.into()))?;
    Ok(issued.token)
}

/// Present a refresh token from a request body, treating blank as absent.
fn required_token(token: Option<&str>) -> Result<&str, MarketplaceError> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(MarketplaceError::RefreshTokenRequired)
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account_id: AccountId,
    pub profile_id: ProfileId,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct LoginUseCase<A: AccountRepository, P: ProfileRepository, H: CredentialHasher> {
    pub accounts: A,
    pub profiles: P,
    pub hasher: H,
    pub settings: SessionSettings,
}

impl<A: AccountRepository, P: ProfileRepository, H: CredentialHasher> LoginUseCase<A, P, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, MarketplaceError> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(MarketplaceError::InvalidField("username"));
        }
        if input.password.is_empty() {
            return Err(MarketplaceError::InvalidField("password"));
        }

        let Some(account) = self.accounts.find_by_username(username).await? else {
            // Same hashing cost as a wrong password.
            self.hasher
                .verify(&input.password, self.hasher.decoy_hash())
                .await;
            return Err(MarketplaceError::InvalidCredentials);
        };
        if !self
            .hasher
            .verify(&input.password, &account.password_hash)
            .await
        {
            return Err(MarketplaceError::InvalidCredentials);
        }
        // Indistinguishable from a wrong password on the wire.
        if !account.is_active {
            tracing::debug!(account_id = %account.id, "login refused for inactive account");
            return Err(MarketplaceError::InvalidCredentials);
        }

        let profile = self
            .profiles
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| {
                tracing::error!(account_id = %account.id, "active account has no profile");
                MarketplaceError::ProfileMissing
            })?;

        let access_token = issue(&self.settings, account.id, TokenKind::Access)?;
        let refresh_token = issue(&self.settings, account.id, TokenKind::Refresh)?;
        self.accounts.record_login(account.id, Utc::now()).await?;
        tracing::info!(account_id = %account.id, "login succeeded");

        Ok(LoginOutput {
            account_id: account.id,
            profile_id: profile.id,
            access_token,
            refresh_token,
        })
    }
}

// ── Refresh ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
}

pub struct RefreshSessionUseCase<A: AccountRepository, R: RevokedTokenRepository> {
    pub accounts: A,
    pub revoked: R,
    pub settings: SessionSettings,
}

impl<A: AccountRepository, R: RevokedTokenRepository> RefreshSessionUseCase<A, R> {
    /// Mint a new access token. The refresh token is not rotated.
    pub async fn execute(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<RefreshOutput, MarketplaceError> {
        let token = required_token(refresh_token)?;
        let info = validate_refresh_token(token, &self.settings.jwt_secret)
            .map_err(|_| MarketplaceError::InvalidRefreshToken)?;
        if self.revoked.is_revoked(info.token_id).await? {
            return Err(MarketplaceError::InvalidRefreshToken);
        }
        let account = self
            .accounts
            .find_by_id(info.account_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(MarketplaceError::InvalidRefreshToken)?;

        let access_token = issue(&self.settings, account.id, TokenKind::Access)?;
        Ok(RefreshOutput { access_token })
    }
}

// ── Logout ────────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<R: RevokedTokenRepository> {
    pub revoked: R,
    pub jwt_secret: String,
}

impl<R: RevokedTokenRepository> LogoutUseCase<R> {
    /// Revoke `refresh_token`, which must belong to `caller`.
    pub async fn execute(
        &self,
        caller: AccountId,
        refresh_token: Option<&str>,
    ) -> Result<(), MarketplaceError> {
        let token = required_token(refresh_token)?;
        let info = validate_refresh_token(token, &self.jwt_secret)
            .map_err(|_| MarketplaceError::InvalidToken)?;
        if info.account_id != caller {
            tracing::debug!(%caller, owner = %info.account_id, "logout with foreign refresh token");
            return Err(MarketplaceError::InvalidToken);
        }

        let expires_at = i64::try_from(info.exp)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or(MarketplaceError::InvalidToken)?;
        let revoked = self
            .revoked
            .revoke(&RevokedToken {
                jti: info.token_id,
                account_id: caller,
                expires_at,
                revoked_at: Utc::now(),
            })
            .await?;
        if !revoked {
            return Err(MarketplaceError::InvalidToken);
        }
        tracing::info!(account_id = %caller, jti = %info.token_id, "refresh token revoked");

        // Entries past expiry (plus validation leeway) can no longer be presented.
        let cutoff = Utc::now() - TimeDelta::seconds(VALIDATION_LEEWAY_SECS as i64);
        match self.revoked.purge_expired(cutoff).await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "purged expired revoked tokens"),
            Err(e) => tracing::warn!(error = %e, "purge of expired revoked tokens failed"),
        }
        Ok(())
    }
}
