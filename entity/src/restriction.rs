use sea_orm::entity::prelude::*;

/// Active restriction on a guild member.
///
/// `unlock_at` is null for indefinite restrictions. `mode` is either `timeout` or
/// `role_swap`; the role columns are only populated for `role_swap`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "restriction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub unlock_at: Option<DateTimeUtc>,
    pub reason: String,
    pub mode: String,
    pub normal_role_id: Option<String>,
    pub restricted_role_id: Option<String>,
    pub issued_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
