use chrono::Utc;

use gigmarket_auth_types::activation::{ActivationTokens, decode_uid, encode_uid};
use gigmarket_domain::id::{AccountId, ProfileId};
use gigmarket_domain::limits::{
    EMAIL_MAX_LEN, LOCATION_MAX_LEN, NAME_MAX_LEN, PHONE_MAX_LEN, USERNAME_MAX_LEN,
    is_valid_optional, is_valid_required,
};
use gigmarket_domain::role::Role;

use crate::domain::repository::{AccountRepository, CredentialHasher, Notifier};
use crate::domain::types::{Account, Message, Profile};
use crate::error::MarketplaceError;

pub const CONFIRMATION_SUBJECT: &str = "Confirm Registration";

/// Body of the confirmation email.
pub fn render_confirmation(confirm_link: &str) -> String {
    format!(
        "<p>Welcome to Gigmarket!</p>\
         <p>Please confirm your registration by opening the link below:</p>\
         <p><a href=\"{confirm_link}\">Confirm my account</a></p>"
    )
}

// ── Register ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RegisterInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub location: String,
    pub role: Option<Role>,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub account_id: AccountId,
    pub profile_id: ProfileId,
}

pub struct RegisterUseCase<A: AccountRepository, H: CredentialHasher, N: Notifier> {
    pub accounts: A,
    pub hasher: H,
    pub notifier: N,
    pub tokens: ActivationTokens,
    /// Origin the confirmation link points at, without a trailing slash.
    pub public_base_url: String,
}

impl<A: AccountRepository, H: CredentialHasher, N: Notifier> RegisterUseCase<A, H, N> {
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, MarketplaceError> {
        let input = normalize(input);
        validate(&input)?;

        if input.password != input.confirm_password {
            return Err(MarketplaceError::PasswordMismatch);
        }
        if self.accounts.email_exists(&input.email).await? {
            return Err(MarketplaceError::EmailTaken);
        }
        if self.accounts.username_exists(&input.username).await? {
            return Err(MarketplaceError::UsernameTaken);
        }

        let account = Account {
            id: AccountId::new(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: self.hasher.hash(&input.password).await?,
            is_active: false,
            last_login: None,
            date_joined: Utc::now(),
        };
        let profile = Profile {
            id: ProfileId::new(),
            account_id: account.id,
            phone_number: input.phone_number,
            location: input.location,
            role: input.role.unwrap_or_default(),
        };
        self.accounts.create_with_profile(&account, &profile).await?;
        tracing::info!(account_id = %account.id, role = %profile.role, "account registered");

        let token = self.tokens.make_token(&account.bound());
        let confirm_link = format!(
            "{}/active/{}/{}/",
            self.public_base_url,
            encode_uid(account.id),
            token
        );
        let message = Message {
            to: account.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_owned(),
            html_body: render_confirmation(&confirm_link),
        };
        // The account stays in place (inactive) if delivery fails.
        self.notifier
            .send(&message)
            .await
            .map_err(MarketplaceError::NotificationFailed)?;

        Ok(RegisterOutput {
            account_id: account.id,
            profile_id: profile.id,
        })
    }
}

fn normalize(input: RegisterInput) -> RegisterInput {
    RegisterInput {
        username: input.username.trim().to_owned(),
        first_name: input.first_name.trim().to_owned(),
        last_name: input.last_name.trim().to_owned(),
        email: input.email.trim().to_owned(),
        phone_number: input.phone_number.trim().to_owned(),
        location: input.location.trim().to_owned(),
        ..input
    }
}

fn validate(input: &RegisterInput) -> Result<(), MarketplaceError> {
    if !is_valid_required(&input.username, USERNAME_MAX_LEN) {
        return Err(MarketplaceError::InvalidField("username"));
    }
    if !is_valid_optional(&input.first_name, NAME_MAX_LEN) {
        return Err(MarketplaceError::InvalidField("first_name"));
    }
    if !is_valid_optional(&input.last_name, NAME_MAX_LEN) {
        return Err(MarketplaceError::InvalidField("last_name"));
    }
    if !is_valid_required(&input.email, EMAIL_MAX_LEN) || !looks_like_email(&input.email) {
        return Err(MarketplaceError::InvalidField("email"));
    }
    if input.password.is_empty() {
        return Err(MarketplaceError::InvalidField("password"));
    }
    if input.confirm_password.is_empty() {
        return Err(MarketplaceError::InvalidField("confirm_password"));
    }
    if !is_valid_required(&input.phone_number, PHONE_MAX_LEN) {
        return Err(MarketplaceError::InvalidField("phone_number"));
    }
    if !is_valid_required(&input.location, LOCATION_MAX_LEN) {
        return Err(MarketplaceError::InvalidField("location"));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

// ── Activate ──────────────────────────────────────────────────────────────────

pub struct ActivateAccountUseCase<A: AccountRepository> {
    pub accounts: A,
    pub tokens: ActivationTokens,
}

impl<A: AccountRepository> ActivateAccountUseCase<A> {
    /// Returns `true` if this call activated the account. Unknown accounts,
    /// bad tokens and already-active accounts all yield `false`.
    pub async fn execute(&self, uid: &str, token: &str) -> Result<bool, MarketplaceError> {
        let Some(account_id) = decode_uid(uid) else {
            tracing::debug!("activation with undecodable uid");
            return Ok(false);
        };
        let Some(account) = self.accounts.find_by_id(account_id).await? else {
            tracing::debug!(%account_id, "activation for unknown account");
            return Ok(false);
        };
        if !self.tokens.check_token(&account.bound(), token) {
            tracing::debug!(%account_id, "activation token rejected");
            return Ok(false);
        }
        let activated = self.accounts.activate(account_id).await?;
        if activated {
            tracing::info!(%account_id, "account activated");
        }
        Ok(activated)
    }
}
