use gigmarket_domain::id::ProfileId;
use gigmarket_domain::limits::{
    LOCATION_MAX_LEN, NAME_MAX_LEN, PHONE_MAX_LEN, is_valid_optional, is_valid_required,
};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{ProfileChanges, ProfileWithAccount};
use crate::error::MarketplaceError;

// ── ListProfiles ──────────────────────────────────────────────────────────────

pub struct ListProfilesUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> ListProfilesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<ProfileWithAccount>, MarketplaceError> {
        self.repo.list_with_accounts().await
    }
}

// ── GetProfile ────────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> GetProfileUseCase<P> {
    pub async fn execute(&self, id: ProfileId) -> Result<ProfileWithAccount, MarketplaceError> {
        self.repo
            .find_with_account(id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)
    }
}

// ── UpdateProfile ─────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> UpdateProfileUseCase<P> {
    /// Apply an admin edit and return the updated row.
    pub async fn execute(
        &self,
        id: ProfileId,
        changes: ProfileChanges,
    ) -> Result<ProfileWithAccount, MarketplaceError> {
        if changes.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        let trim = |v: Option<String>| v.map(|s| s.trim().to_owned());
        let changes = ProfileChanges {
            phone_number: trim(changes.phone_number),
            location: trim(changes.location),
            first_name: trim(changes.first_name),
            last_name: trim(changes.last_name),
            role: changes.role,
        };
        validate(&changes)?;

        if !self.repo.update(id, &changes).await? {
            return Err(MarketplaceError::ProfileNotFound);
        }
        if let Some(role) = changes.role {
            tracing::info!(profile_id = %id, %role, "profile role changed by admin");
        }
        self.repo
            .find_with_account(id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)
    }
}

fn validate(changes: &ProfileChanges) -> Result<(), MarketplaceError> {
    let checks = [
        (&changes.phone_number, "phone_number", PHONE_MAX_LEN, true),
        (&changes.location, "location", LOCATION_MAX_LEN, true),
        (&changes.first_name, "first_name", NAME_MAX_LEN, false),
        (&changes.last_name, "last_name", NAME_MAX_LEN, false),
    ];
    for (value, field, max, required) in checks {
        let Some(value) = value else { continue };
        let ok = if required {
            is_valid_required(value, max)
        } else {
            is_valid_optional(value, max)
        };
        if !ok {
            return Err(MarketplaceError::InvalidField(field));
        }
    }
    Ok(())
}

// ── DeleteProfile ─────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> DeleteProfileUseCase<P> {
    /// Remove the profile and its job posts. The account row is kept.
    pub async fn execute(&self, id: ProfileId) -> Result<(), MarketplaceError> {
        if !self.repo.delete(id).await? {
            return Err(MarketplaceError::ProfileNotFound);
        }
        tracing::info!(profile_id = %id, "profile deleted by admin");
        Ok(())
    }
}
