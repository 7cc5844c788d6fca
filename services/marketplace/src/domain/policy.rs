//! Role-based access rules, evaluated before any gated handler body runs.

use gigmarket_auth_types::identity::Authenticated;
use gigmarket_domain::role::Role;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::MarketplaceError;

/// Access rule attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Only callers whose profile holds exactly this role.
    RequireRole(Role),
}

impl Policy {
    pub fn permits(self, role: Role) -> bool {
        match self {
            Self::RequireRole(required) => required == role,
        }
    }
}

/// Resolve the caller's profile and check it against `policy`.
///
/// Anonymous callers are refused with [`MarketplaceError::Forbidden`]. An
/// authenticated account without a profile is a data-integrity fault and
/// surfaces as [`MarketplaceError::ProfileMissing`].
pub async fn authorize<P: ProfileRepository>(
    profiles: &P,
    identity: Option<&Authenticated>,
    policy: Policy,
) -> Result<Profile, MarketplaceError> {
    let Some(identity) = identity else {
        return Err(MarketplaceError::Forbidden);
    };
    let profile = profiles
        .find_by_account(identity.account_id)
        .await?
        .ok_or_else(|| {
            tracing::error!(account_id = %identity.account_id, "authenticated account has no profile");
            MarketplaceError::ProfileMissing
        })?;
    if !policy.permits(profile.role) {
        tracing::debug!(
            account_id = %identity.account_id,
            role = %profile.role,
            ?policy,
            "access denied"
        );
        return Err(MarketplaceError::Forbidden);
    }
    Ok(profile)
}
