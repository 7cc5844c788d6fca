use sea_orm::entity::prelude::*;

/// Marketplace profile, 1:1 with an account (cascade on account delete).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub account_id: Uuid,
    pub phone_number: String,
    pub location: String,
    /// `Freelancer` | `Client` | `Admin`.
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(has_many = "super::job_posts::Entity")]
    JobPosts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::job_posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobPosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
