use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use gigmarket_core::serde::to_rfc3339_ms;
use gigmarket_domain::id::{JobPostId, ProfileId};

use crate::domain::types::{JobPost, JobPostChanges};
use crate::error::MarketplaceError;
use crate::handlers::gate::{Authorized, ClientOnly};
use crate::state::AppState;
use crate::usecase::job_post::{
    CreateJobPostInput, CreateJobPostUseCase, DeleteJobPostUseCase, GetJobPostUseCase,
    ListJobPostsUseCase, UpdateJobPostUseCase,
};

/// External shape of a job post. Only these fields ever leave the service.
#[derive(Serialize)]
pub struct JobPostResponse {
    pub id: JobPostId,
    pub author: ProfileId,
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<JobPost> for JobPostResponse {
    fn from(post: JobPost) -> Self {
        Self {
            id: post.id,
            author: post.author,
            title: post.title,
            description: post.description,
            status: post.status,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ── GET /jobs/ ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListJobPostsQuery {
    pub author: Option<ProfileId>,
}

pub async fn list_job_posts(
    State(state): State<AppState>,
    Query(query): Query<ListJobPostsQuery>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = ListJobPostsUseCase {
        repo: state.job_post_repo(),
    };
    let posts = usecase.execute(query.author).await?;
    let body: Vec<JobPostResponse> = posts.into_iter().map(JobPostResponse::from).collect();
    Ok(Json(body))
}

// ── GET /jobs/{id}/ ───────────────────────────────────────────────────────────

pub async fn get_job_post(
    State(state): State<AppState>,
    Path(id): Path<JobPostId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetJobPostUseCase {
        repo: state.job_post_repo(),
    };
    let post = usecase.execute(id).await?;
    Ok(Json(JobPostResponse::from(post)))
}

// ── POST /jobs/ ───────────────────────────────────────────────────────────────

/// No `author` field: the author is always the caller.
#[derive(Deserialize)]
pub struct CreateJobPostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
}

impl CreateJobPostRequest {
    /// Attach the caller's profile as author.
    pub fn into_input(self, author: ProfileId) -> CreateJobPostInput {
        CreateJobPostInput {
            author,
            title: self.title,
            description: self.description,
            status: self.status,
        }
    }
}

pub async fn create_job_post(
    Authorized { profile, .. }: Authorized<ClientOnly>,
    State(state): State<AppState>,
    Json(body): Json<CreateJobPostRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = CreateJobPostUseCase {
        repo: state.job_post_repo(),
    };
    let post = usecase.execute(body.into_input(profile.id)).await?;
    Ok((StatusCode::CREATED, Json(JobPostResponse::from(post))))
}

// ── PATCH /jobs/{id}/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateJobPostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

pub async fn update_job_post(
    _caller: Authorized<ClientOnly>,
    State(state): State<AppState>,
    Path(id): Path<JobPostId>,
    Json(body): Json<UpdateJobPostRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = UpdateJobPostUseCase {
        repo: state.job_post_repo(),
    };
    let post = usecase
        .execute(
            id,
            JobPostChanges {
                title: body.title,
                description: body.description,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(JobPostResponse::from(post)))
}

// ── DELETE /jobs/{id}/ ────────────────────────────────────────────────────────

pub async fn delete_job_post(
    _caller: Authorized<ClientOnly>,
    State(state): State<AppState>,
    Path(id): Path<JobPostId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = DeleteJobPostUseCase {
        repo: state.job_post_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
