//! Role gate extractor. Runs the route's [`Policy`] before the handler body.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gigmarket_auth_types::identity::authenticate;
use gigmarket_domain::role::Role;

use crate::domain::policy::{Policy, authorize};
use crate::domain::types::Profile;
use crate::error::MarketplaceError;
use crate::state::AppState;

/// Role a gated route requires.
pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: Role;
}

pub struct ClientOnly;

impl RequiredRole for ClientOnly {
    const ROLE: Role = Role::Client;
}

pub struct AdminOnly;

impl RequiredRole for AdminOnly {
    const ROLE: Role = Role::Admin;
}

/// The caller's profile, proven to hold role `R`.
///
/// Rejects anonymous callers and callers with another role with 403, and an
/// authenticated account that has no profile with 500.
pub struct Authorized<R: RequiredRole> {
    pub profile: Profile,
    _role: PhantomData<R>,
}

impl<R: RequiredRole> FromRequestParts<AppState> for Authorized<R> {
    type Rejection = MarketplaceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = authenticate(&parts.headers, &state.sessions.jwt_secret);
        let profiles = state.profile_repo();
        async move {
            let profile =
                authorize(&profiles, identity.as_ref(), Policy::RequireRole(R::ROLE)).await?;
            Ok(Self {
                profile,
                _role: PhantomData,
            })
        }
    }
}
