use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use gigmarket_auth_types::identity::Authenticated;
use gigmarket_domain::id::ProfileId;

use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase, RefreshSessionUseCase};

// ── POST /login/ ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub profile_id: ProfileId,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
        hasher: state.hasher.clone(),
        settings: state.sessions.clone(),
    };

    let out = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access: out.access_token,
        refresh: out.refresh_token,
        profile_id: out.profile_id,
    }))
}

/// Body carrying a refresh token (`/token/refresh/` and `/logout/`).
#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

// ── POST /token/refresh/ ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = RefreshSessionUseCase {
        accounts: state.account_repo(),
        revoked: state.revoked_token_repo(),
        settings: state.sessions.clone(),
    };

    let out = usecase.execute(body.refresh.as_deref()).await?;
    Ok(Json(RefreshResponse {
        access: out.access_token,
    }))
}

// ── POST /logout/ ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

pub async fn logout(
    identity: Authenticated,
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = LogoutUseCase {
        revoked: state.revoked_token_repo(),
        jwt_secret: state.sessions.jwt_secret.clone(),
    };

    usecase
        .execute(identity.account_id, body.refresh.as_deref())
        .await?;

    Ok(Json(LogoutResponse {
        message: "Logout successful",
    }))
}
