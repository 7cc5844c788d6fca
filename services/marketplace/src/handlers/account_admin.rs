use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use gigmarket_core::serde::to_rfc3339_ms_opt;
use gigmarket_domain::id::{AccountId, ProfileId};
use gigmarket_domain::role::Role;

use crate::domain::types::{ProfileChanges, ProfileWithAccount};
use crate::error::MarketplaceError;
use crate::handlers::gate::{AdminOnly, Authorized};
use crate::state::AppState;
use crate::usecase::account_admin::{
    DeleteProfileUseCase, GetProfileUseCase, ListProfilesUseCase, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub account: AccountSummary,
    pub phone_number: String,
    pub location: String,
    pub role: Role,
}

impl From<ProfileWithAccount> for ProfileResponse {
    fn from(row: ProfileWithAccount) -> Self {
        let ProfileWithAccount { profile, account } = row;
        Self {
            id: profile.id,
            account: AccountSummary {
                id: account.id,
                username: account.username,
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email,
                is_active: account.is_active,
                last_login: account.last_login,
            },
            phone_number: profile.phone_number,
            location: profile.location,
            role: profile.role,
        }
    }
}

// ── GET /list/ ────────────────────────────────────────────────────────────────

pub async fn list_profiles(
    _admin: Authorized<AdminOnly>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = ListProfilesUseCase {
        repo: state.profile_repo(),
    };
    let rows = usecase.execute().await?;
    let body: Vec<ProfileResponse> = rows.into_iter().map(ProfileResponse::from).collect();
    Ok(Json(body))
}

// ── GET /list/{id}/ ───────────────────────────────────────────────────────────

pub async fn get_profile(
    _admin: Authorized<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let row = usecase.execute(id).await?;
    Ok(Json(ProfileResponse::from(row)))
}

// ── PATCH /list/{id}/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn update_profile(
    _admin: Authorized<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    let row = usecase
        .execute(
            id,
            ProfileChanges {
                phone_number: body.phone_number,
                location: body.location,
                role: body.role,
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    Ok(Json(ProfileResponse::from(row)))
}

// ── DELETE /list/{id}/ ────────────────────────────────────────────────────────

pub async fn delete_profile(
    _admin: Authorized<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = DeleteProfileUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
