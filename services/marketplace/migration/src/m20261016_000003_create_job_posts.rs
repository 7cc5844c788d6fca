use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobPosts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(JobPosts::Title).string_len(255).not_null())
                    .col(ColumnDef::new(JobPosts::Description).text().not_null())
                    .col(
                        ColumnDef::new(JobPosts::Status)
                            .string_len(50)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(JobPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(JobPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(JobPosts::Table, JobPosts::AuthorId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(JobPosts::Table)
                    .col(JobPosts::AuthorId)
                    .name("idx_job_posts_author_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobPosts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum JobPosts {
    Table,
    Id,
    AuthorId,
    Title,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}
