use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionError, TransactionTrait,
};
use uuid::Uuid;

use gigmarket_domain::id::{AccountId, JobPostId, ProfileId};
use gigmarket_domain::role::Role;
use gigmarket_marketplace_schema::{accounts, job_posts, profiles, revoked_tokens};

use crate::domain::repository::{
    AccountRepository, JobPostRepository, ProfileRepository, RevokedTokenRepository,
};
use crate::domain::types::{
    Account, JobPost, JobPostChanges, Profile, ProfileChanges, ProfileWithAccount, RevokedToken,
};
use crate::error::MarketplaceError;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, MarketplaceError> {
        let model = accounts::Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, MarketplaceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find account by username")?;
        Ok(model.map(account_from_model))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, MarketplaceError> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count accounts by email")?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, MarketplaceError> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count accounts by username")?;
        Ok(count > 0)
    }

    async fn create_with_profile(
        &self,
        account: &Account,
        profile: &Profile,
    ) -> Result<(), MarketplaceError> {
        let account_model = accounts::ActiveModel {
            id: Set(account.id.as_uuid()),
            username: Set(account.username.clone()),
            email: Set(account.email.clone()),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            password_hash: Set(account.password_hash.clone()),
            is_active: Set(account.is_active),
            last_login: Set(account.last_login),
            date_joined: Set(account.date_joined),
        };
        let profile_model = profiles::ActiveModel {
            id: Set(profile.id.as_uuid()),
            account_id: Set(profile.account_id.as_uuid()),
            phone_number: Set(profile.phone_number.clone()),
            location: Set(profile.location.clone()),
            role: Set(profile.role.as_str().to_owned()),
        };
        let result = self
            .db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    account_model.insert(txn).await?;
                    profile_model.insert(txn).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e))
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Err(MarketplaceError::AccountExists)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("create account with profile")
                .into()),
        }
    }

    async fn activate(&self, id: AccountId) -> Result<bool, MarketplaceError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::IsActive, Expr::value(true))
            .filter(accounts::Column::Id.eq(id.as_uuid()))
            .filter(accounts::Column::IsActive.eq(false))
            .exec(&self.db)
            .await
            .context("activate account")?;
        Ok(result.rows_affected == 1)
    }

    async fn record_login(
        &self,
        id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), MarketplaceError> {
        accounts::Entity::update_many()
            .col_expr(accounts::Column::LastLogin, Expr::value(at))
            .filter(accounts::Column::Id.eq(id.as_uuid()))
            .exec(&self.db)
            .await
            .context("record last login")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: AccountId(model.id),
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        is_active: model.is_active,
        last_login: model.last_login,
        date_joined: model.date_joined,
    }
}

// ── Profile repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Profile>, MarketplaceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::AccountId.eq(account_id.as_uuid()))
            .one(&self.db)
            .await
            .context("find profile by account")?;
        model.map(profile_from_model).transpose()
    }

    async fn find_with_account(
        &self,
        id: ProfileId,
    ) -> Result<Option<ProfileWithAccount>, MarketplaceError> {
        let row = profiles::Entity::find_by_id(id.as_uuid())
            .find_also_related(accounts::Entity)
            .one(&self.db)
            .await
            .context("find profile with account")?;
        match row {
            Some((profile, Some(account))) => Ok(Some(ProfileWithAccount {
                profile: profile_from_model(profile)?,
                account: account_from_model(account),
            })),
            _ => Ok(None),
        }
    }

    async fn list_with_accounts(&self) -> Result<Vec<ProfileWithAccount>, MarketplaceError> {
        let rows = profiles::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(profiles::Column::Id)
            .all(&self.db)
            .await
            .context("list profiles with accounts")?;
        rows.into_iter()
            .filter_map(|(profile, account)| account.map(|a| (profile, a)))
            .map(|(profile, account)| {
                Ok(ProfileWithAccount {
                    profile: profile_from_model(profile)?,
                    account: account_from_model(account),
                })
            })
            .collect()
    }

    async fn update(
        &self,
        id: ProfileId,
        changes: &ProfileChanges,
    ) -> Result<bool, MarketplaceError> {
        let changes = changes.clone();
        let found = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    let Some(model) = profiles::Entity::find_by_id(id.as_uuid()).one(txn).await?
                    else {
                        return Ok(false);
                    };
                    let account_id = model.account_id;

                    let mut profile = model.into_active_model();
                    if let Some(phone_number) = changes.phone_number {
                        profile.phone_number = Set(phone_number);
                    }
                    if let Some(location) = changes.location {
                        profile.location = Set(location);
                    }
                    if let Some(role) = changes.role {
                        profile.role = Set(role.as_str().to_owned());
                    }
                    if profile.is_changed() {
                        profile.update(txn).await?;
                    }

                    if changes.first_name.is_some() || changes.last_name.is_some() {
                        let mut account = accounts::ActiveModel {
                            id: Set(account_id),
                            ..Default::default()
                        };
                        if let Some(first_name) = changes.first_name {
                            account.first_name = Set(first_name);
                        }
                        if let Some(last_name) = changes.last_name {
                            account.last_name = Set(last_name);
                        }
                        account.update(txn).await?;
                    }
                    Ok(true)
                })
            })
            .await
            .context("update profile")?;
        Ok(found)
    }

    async fn delete(&self, id: ProfileId) -> Result<bool, MarketplaceError> {
        let result = profiles::Entity::delete_by_id(id.as_uuid())
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, MarketplaceError> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("profile {} has an unknown role", model.id))?;
    Ok(Profile {
        id: ProfileId(model.id),
        account_id: AccountId(model.account_id),
        phone_number: model.phone_number,
        location: model.location,
        role,
    })
}

// ── JobPost repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbJobPostRepository {
    pub db: DatabaseConnection,
}

impl JobPostRepository for DbJobPostRepository {
    async fn list(&self, author: Option<ProfileId>) -> Result<Vec<JobPost>, MarketplaceError> {
        let mut query = job_posts::Entity::find();
        if let Some(author) = author {
            query = query.filter(job_posts::Column::AuthorId.eq(author.as_uuid()));
        }
        let models = query
            .order_by_desc(job_posts::Column::CreatedAt)
            .order_by_desc(job_posts::Column::Id)
            .all(&self.db)
            .await
            .context("list job posts")?;
        Ok(models.into_iter().map(job_post_from_model).collect())
    }

    async fn find_by_id(&self, id: JobPostId) -> Result<Option<JobPost>, MarketplaceError> {
        let model = job_posts::Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .context("find job post")?;
        Ok(model.map(job_post_from_model))
    }

    async fn create(&self, post: &JobPost) -> Result<(), MarketplaceError> {
        job_posts::ActiveModel {
            id: Set(post.id.as_uuid()),
            author_id: Set(post.author.as_uuid()),
            title: Set(post.title.clone()),
            description: Set(post.description.clone()),
            status: Set(post.status.clone()),
            created_at: Set(post.created_at),
            updated_at: Set(post.updated_at),
        }
        .insert(&self.db)
        .await
        .context("insert job post")?;
        Ok(())
    }

    async fn update(
        &self,
        id: JobPostId,
        changes: &JobPostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobPost>, MarketplaceError> {
        let Some(model) = job_posts::Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .context("find job post for update")?
        else {
            return Ok(None);
        };
        let mut post = model.into_active_model();
        if let Some(title) = &changes.title {
            post.title = Set(title.clone());
        }
        if let Some(description) = &changes.description {
            post.description = Set(description.clone());
        }
        if let Some(status) = &changes.status {
            post.status = Set(status.clone());
        }
        post.updated_at = Set(updated_at);
        let model = post.update(&self.db).await.context("update job post")?;
        Ok(Some(job_post_from_model(model)))
    }

    async fn delete(&self, id: JobPostId) -> Result<bool, MarketplaceError> {
        let result = job_posts::Entity::delete_by_id(id.as_uuid())
            .exec(&self.db)
            .await
            .context("delete job post")?;
        Ok(result.rows_affected > 0)
    }
}

fn job_post_from_model(model: job_posts::Model) -> JobPost {
    JobPost {
        id: JobPostId(model.id),
        author: ProfileId(model.author_id),
        title: model.title,
        description: model.description,
        status: model.status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Revoked token repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRevokedTokenRepository {
    pub db: DatabaseConnection,
}

impl RevokedTokenRepository for DbRevokedTokenRepository {
    async fn is_revoked(&self, jti: Uuid) -> Result<bool, MarketplaceError> {
        let model = revoked_tokens::Entity::find_by_id(jti)
            .one(&self.db)
            .await
            .context("look up revoked token")?;
        Ok(model.is_some())
    }

    async fn revoke(&self, token: &RevokedToken) -> Result<bool, MarketplaceError> {
        let model = revoked_tokens::ActiveModel {
            jti: Set(token.jti),
            account_id: Set(token.account_id.as_uuid()),
            expires_at: Set(token.expires_at),
            revoked_at: Set(token.revoked_at),
        };
        // ON CONFLICT DO NOTHING: a second revoke of the same jti inserts zero rows.
        let inserted = revoked_tokens::Entity::insert(model)
            .on_conflict(
                OnConflict::column(revoked_tokens::Column::Jti)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert revoked token")?;
        Ok(inserted == 1)
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, MarketplaceError> {
        let result = revoked_tokens::Entity::delete_many()
            .filter(revoked_tokens::Column::ExpiresAt.lt(cutoff))
            .exec(&self.db)
            .await
            .context("purge expired revoked tokens")?;
        Ok(result.rows_affected)
    }
}
