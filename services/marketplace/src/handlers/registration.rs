use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use gigmarket_domain::role::Role;

use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::registration::{ActivateAccountUseCase, RegisterInput, RegisterUseCase};

pub const REGISTRATION_ACK: &str = "Check email for confirmation";

// ── POST /register/ ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub location: String,
    pub role: Option<Role>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher.clone(),
        notifier: state.notifier.clone(),
        tokens: state.activation.clone(),
        public_base_url: state.links.public_base_url.clone(),
    };

    usecase
        .execute(RegisterInput {
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
            phone_number: body.phone_number,
            location: body.location,
            role: body.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(REGISTRATION_ACK)))
}

// ── GET /active/{uid}/{token}/ ────────────────────────────────────────────────

/// Always answers with a redirect: login on success, register on any failure.
pub async fn activate(
    State(state): State<AppState>,
    Path((uid, token)): Path<(String, String)>,
) -> Redirect {
    let usecase = ActivateAccountUseCase {
        accounts: state.account_repo(),
        tokens: state.activation.clone(),
    };

    match usecase.execute(&uid, &token).await {
        Ok(true) => Redirect::to(&state.links.login_redirect_url),
        Ok(false) => Redirect::to(&state.links.register_redirect_url),
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "activation failed");
            Redirect::to(&state.links.register_redirect_url)
        }
    }
}
