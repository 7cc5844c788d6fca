use chrono::Utc;

use gigmarket_domain::id::{JobPostId, ProfileId};
use gigmarket_domain::job::initial_status;
use gigmarket_domain::limits::{JOB_STATUS_MAX_LEN, JOB_TITLE_MAX_LEN, is_valid_required};

use crate::domain::repository::JobPostRepository;
use crate::domain::types::{JobPost, JobPostChanges};
use crate::error::MarketplaceError;

fn check_title(title: &str) -> Result<(), MarketplaceError> {
    if is_valid_required(title, JOB_TITLE_MAX_LEN) {
        Ok(())
    } else {
        Err(MarketplaceError::InvalidField("title"))
    }
}

fn check_description(description: &str) -> Result<(), MarketplaceError> {
    if description.trim().is_empty() {
        Err(MarketplaceError::InvalidField("description"))
    } else {
        Ok(())
    }
}

fn check_status(status: &str) -> Result<(), MarketplaceError> {
    if is_valid_required(status, JOB_STATUS_MAX_LEN) {
        Ok(())
    } else {
        Err(MarketplaceError::InvalidField("status"))
    }
}

// ── CreateJobPost ─────────────────────────────────────────────────────────────

pub struct CreateJobPostInput {
    /// The authenticated caller's profile; never taken from the request body.
    pub author: ProfileId,
    pub title: String,
    pub description: String,
    pub status: Option<String>,
}

pub struct CreateJobPostUseCase<J: JobPostRepository> {
    pub repo: J,
}

impl<J: JobPostRepository> CreateJobPostUseCase<J> {
    pub async fn execute(&self, input: CreateJobPostInput) -> Result<JobPost, MarketplaceError> {
        let title = input.title.trim().to_owned();
        check_title(&title)?;
        check_description(&input.description)?;
        let status = initial_status(input.status.as_deref());
        check_status(&status)?;

        let now = Utc::now();
        let post = JobPost {
            id: JobPostId::new(),
            author: input.author,
            title,
            description: input.description,
            status,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&post).await?;
        tracing::info!(job_post_id = %post.id, author = %post.author, "job post created");
        Ok(post)
    }
}

// ── ListJobPosts ──────────────────────────────────────────────────────────────

pub struct ListJobPostsUseCase<J: JobPostRepository> {
    pub repo: J,
}

impl<J: JobPostRepository> ListJobPostsUseCase<J> {
    pub async fn execute(&self, author: Option<ProfileId>) -> Result<Vec<JobPost>, MarketplaceError> {
        self.repo.list(author).await
    }
}

// ── GetJobPost ────────────────────────────────────────────────────────────────

pub struct GetJobPostUseCase<J: JobPostRepository> {
    pub repo: J,
}

impl<J: JobPostRepository> GetJobPostUseCase<J> {
    pub async fn execute(&self, id: JobPostId) -> Result<JobPost, MarketplaceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(MarketplaceError::JobNotFound)
    }
}

// ── UpdateJobPost ─────────────────────────────────────────────────────────────

pub struct UpdateJobPostUseCase<J: JobPostRepository> {
    pub repo: J,
}

impl<J: JobPostRepository> UpdateJobPostUseCase<J> {
    pub async fn execute(
        &self,
        id: JobPostId,
        changes: JobPostChanges,
    ) -> Result<JobPost, MarketplaceError> {
        if changes.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        let changes = JobPostChanges {
            title: changes.title.map(|t| t.trim().to_owned()),
            status: changes.status.map(|s| s.trim().to_owned()),
            ..changes
        };
        if let Some(title) = &changes.title {
            check_title(title)?;
        }
        if let Some(description) = &changes.description {
            check_description(description)?;
        }
        if let Some(status) = &changes.status {
            check_status(status)?;
        }
        self.repo
            .update(id, &changes, Utc::now())
            .await?
            .ok_or(MarketplaceError::JobNotFound)
    }
}

// ── DeleteJobPost ─────────────────────────────────────────────────────────────

pub struct DeleteJobPostUseCase<J: JobPostRepository> {
    pub repo: J,
}

impl<J: JobPostRepository> DeleteJobPostUseCase<J> {
    pub async fn execute(&self, id: JobPostId) -> Result<(), MarketplaceError> {
        if !self.repo.delete(id).await? {
            return Err(MarketplaceError::JobNotFound);
        }
        tracing::info!(job_post_id = %id, "job post deleted");
        Ok(())
    }
}
