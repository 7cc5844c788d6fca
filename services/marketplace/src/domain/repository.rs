#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gigmarket_domain::id::{AccountId, JobPostId, ProfileId};

use crate::domain::types::{
    Account, JobPost, JobPostChanges, Message, Profile, ProfileChanges, ProfileWithAccount,
    RevokedToken,
};
use crate::error::MarketplaceError;

/// Repository for authentication accounts.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, MarketplaceError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<Account>, MarketplaceError>;

    async fn email_exists(&self, email: &str) -> Result<bool, MarketplaceError>;

    async fn username_exists(&self, username: &str) -> Result<bool, MarketplaceError>;

    /// Insert an account and its profile atomically (same transaction).
    ///
    /// Returns [`MarketplaceError::AccountExists`] if a concurrent registration
    /// claimed the username or email first.
    async fn create_with_profile(
        &self,
        account: &Account,
        profile: &Profile,
    ) -> Result<(), MarketplaceError>;

    /// Flip `is_active` from false to true. Returns `false` if the account is
    /// missing or already active, so at most one caller ever sees `true`.
    async fn activate(&self, id: AccountId) -> Result<bool, MarketplaceError>;

    async fn record_login(&self, id: AccountId, at: DateTime<Utc>)
    -> Result<(), MarketplaceError>;
}

/// Repository for marketplace profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Profile>, MarketplaceError>;

    async fn find_with_account(
        &self,
        id: ProfileId,
    ) -> Result<Option<ProfileWithAccount>, MarketplaceError>;

    async fn list_with_accounts(&self) -> Result<Vec<ProfileWithAccount>, MarketplaceError>;

    /// Apply `changes` to the profile and its account names. Returns `false` if not found.
    async fn update(
        &self,
        id: ProfileId,
        changes: &ProfileChanges,
    ) -> Result<bool, MarketplaceError>;

    /// Delete a profile and, by cascade, its job posts. Returns `false` if not found.
    async fn delete(&self, id: ProfileId) -> Result<bool, MarketplaceError>;
}

/// Repository for job posts.
pub trait JobPostRepository: Send + Sync {
    /// Newest first, optionally restricted to one author.
    async fn list(&self, author: Option<ProfileId>) -> Result<Vec<JobPost>, MarketplaceError>;

    async fn find_by_id(&self, id: JobPostId) -> Result<Option<JobPost>, MarketplaceError>;

    async fn create(&self, post: &JobPost) -> Result<(), MarketplaceError>;

    /// Apply `changes` and bump `updated_at`. Returns `None` if not found.
    async fn update(
        &self,
        id: JobPostId,
        changes: &JobPostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobPost>, MarketplaceError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: JobPostId) -> Result<bool, MarketplaceError>;
}

/// Durable set of revoked refresh tokens, keyed by `jti`.
pub trait RevokedTokenRepository: Send + Sync {
    async fn is_revoked(&self, jti: Uuid) -> Result<bool, MarketplaceError>;

    /// Add a token to the set. Returns `false` if it was already there.
    async fn revoke(&self, token: &RevokedToken) -> Result<bool, MarketplaceError>;

    /// Drop entries whose token expired before `cutoff`. Returns the number removed.
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, MarketplaceError>;
}

/// One-way credential hashing.
///
/// Hashing is CPU-bound; implementations must not block the async runtime.
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, MarketplaceError>;

    /// `false` for a wrong password or an unparseable hash.
    async fn verify(&self, password: &str, hash: &str) -> bool;

    /// A well-formed hash that no password matches. Verified against when
    /// the username is unknown, so that branch costs as much as a real check.
    fn decoy_hash(&self) -> &str;
}

/// Outbound mail delivery.
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> anyhow::Result<()>;
}
