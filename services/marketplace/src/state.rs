use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use gigmarket_auth_types::activation::ActivationTokens;
use gigmarket_auth_types::identity::JwtSecret;

use crate::config::MarketplaceConfig;
use crate::infra::db::{
    DbAccountRepository, DbJobPostRepository, DbProfileRepository, DbRevokedTokenRepository,
};
use crate::infra::hasher::Argon2Hasher;
use crate::infra::notifier::AppNotifier;
use crate::usecase::session::SessionSettings;

/// Redirect and link targets used by the activation flow.
#[derive(Clone)]
pub struct LinkSettings {
    pub public_base_url: String,
    pub login_redirect_url: String,
    pub register_redirect_url: String,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sessions: SessionSettings,
    pub activation: ActivationTokens,
    pub links: LinkSettings,
    pub notifier: AppNotifier,
    pub hasher: Argon2Hasher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &MarketplaceConfig) -> Self {
        Self {
            db,
            sessions: SessionSettings {
                jwt_secret: config.jwt_secret.clone(),
                access_ttl_secs: config.access_token_ttl_secs,
                refresh_ttl_secs: config.refresh_token_ttl_secs,
            },
            activation: ActivationTokens::new(
                config.activation_secret.as_bytes(),
                config.activation_token_ttl_secs,
            ),
            links: LinkSettings {
                public_base_url: config.public_base_url.trim_end_matches('/').to_owned(),
                login_redirect_url: config.login_redirect_url.clone(),
                register_redirect_url: config.register_redirect_url.clone(),
            },
            notifier: AppNotifier::from_config(config),
            hasher: Argon2Hasher,
        }
    }

    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn job_post_repo(&self) -> DbJobPostRepository {
        DbJobPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn revoked_token_repo(&self) -> DbRevokedTokenRepository {
        DbRevokedTokenRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.sessions.jwt_secret.clone())
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
