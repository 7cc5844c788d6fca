use chrono::{DateTime, Utc};
use uuid::Uuid;

use gigmarket_auth_types::activation::BoundAccount;
use gigmarket_domain::id::{AccountId, JobPostId, ProfileId};
use gigmarket_domain::role::Role;

/// Authentication identity.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl Account {
    /// Fields an activation token for this account is bound to.
    pub fn bound(&self) -> BoundAccount<'_> {
        BoundAccount {
            account_id: self.id,
            credential_hash: &self.password_hash,
            email: &self.email,
            is_active: self.is_active,
            last_login: self.last_login.map(|t| t.timestamp()),
        }
    }
}

/// Marketplace profile; exactly one per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub account_id: AccountId,
    pub phone_number: String,
    pub location: String,
    pub role: Role,
}

/// Profile joined with its owning account, as shown to admins.
#[derive(Debug, Clone)]
pub struct ProfileWithAccount {
    pub profile: Profile,
    pub account: Account,
}

/// Admin edit of a profile. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none()
            && self.location.is_none()
            && self.role.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPost {
    pub id: JobPostId,
    pub author: ProfileId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a job post. The author is never changeable.
#[derive(Debug, Clone, Default)]
pub struct JobPostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl JobPostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Entry in the refresh-token revocation set.
#[derive(Debug, Clone)]
pub struct RevokedToken {
    pub jti: Uuid,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: DateTime<Utc>,
}

/// Outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}
