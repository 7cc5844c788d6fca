use axum::{
    Router,
    routing::{get, post},
};

use gigmarket_core::health::{healthz, readyz};
use gigmarket_core::middleware::with_http_layers;

use crate::handlers::{
    account_admin::{delete_profile, get_profile, list_profiles, update_profile},
    job_post::{create_job_post, delete_job_post, get_job_post, list_job_posts, update_job_post},
    registration::{activate, register},
    session::{login, logout, refresh},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration
        .route("/register/", post(register))
        .route("/active/{uid}/{token}/", get(activate))
        // Session
        .route("/login/", post(login))
        .route("/token/refresh/", post(refresh))
        .route("/logout/", post(logout))
        // Job posts
        .route("/jobs/", get(list_job_posts).post(create_job_post))
        .route(
            "/jobs/{id}/",
            get(get_job_post)
                .patch(update_job_post)
                .delete(delete_job_post),
        )
        // Admin
        .route("/list/", get(list_profiles))
        .route(
            "/list/{id}/",
            get(get_profile).patch(update_profile).delete(delete_profile),
        )
        .with_state(state);
    with_http_layers(router)
}
